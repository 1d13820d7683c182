//! The feedback form: eight validated fields, phone masking, a submit
//! summary with the banded average rating, and a transient success notice.

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::info;

use crate::{
    action::Action,
    components::text_field::TextField,
    domain::feedback::Feedback,
    domain::validate::{
        mask_phone, parse_rating, validate_address, validate_email, validate_name, validate_phone,
        validate_rating,
    },
    pages::{Page, PageId},
    theme::Theme,
    tui::{Event, EventResponse},
};

const FIRST_NAME: usize = 0;
const SURNAME: usize = 1;
const EMAIL: usize = 2;
const PHONE: usize = 3;
const ADDRESS: usize = 4;
const RATING1: usize = 5;
const RATING2: usize = 6;
const RATING3: usize = 7;
const FIELD_COUNT: usize = 8;

const LABELS: [&str; FIELD_COUNT] = [
    "First name",
    "Surname",
    "Email",
    "Phone",
    "Address",
    "Service quality (1-10)",
    "Communication (1-10)",
    "Reliability (1-10)",
];

pub struct ContactPage {
    tx: Option<UnboundedSender<Action>>,
    theme: Theme,
    fields: Vec<TextField>,
    focus: usize,
    submitted: Option<Feedback>,
}

impl ContactPage {
    pub fn new() -> Result<Self> {
        Ok(Self {
            tx: None,
            theme: Theme::default(),
            fields: LABELS.iter().map(|label| TextField::new(label)).collect(),
            focus: FIRST_NAME,
            submitted: None,
        })
    }

    fn validate_field(&mut self, index: usize) {
        let value = self.fields[index].value().to_string();
        let error = match index {
            FIRST_NAME | SURNAME => validate_name(&value),
            EMAIL => validate_email(&value),
            PHONE => validate_phone(&value),
            ADDRESS => validate_address(&value),
            _ => validate_rating(&value),
        };
        self.fields[index].set_error(error);
    }

    /// Submit is available only with every field filled and no error slot set.
    fn can_submit(&self) -> bool {
        self.fields.iter().all(|f| !f.is_blank() && f.error().is_none())
    }

    /// Re-runs every validator; a failing field makes this a silent no-op.
    fn submit(&mut self) {
        for index in 0..FIELD_COUNT {
            self.validate_field(index);
        }
        if self.fields.iter().any(|f| f.error().is_some()) {
            return;
        }

        let ratings: Vec<f64> = [RATING1, RATING2, RATING3]
            .iter()
            .filter_map(|&i| parse_rating(self.fields[i].value()))
            .collect();
        let [rating1, rating2, rating3] = match ratings[..] {
            [a, b, c] => [a, b, c],
            // Unreachable after validation, but never panic in a handler.
            _ => return,
        };

        let feedback = Feedback {
            name: self.fields[FIRST_NAME].value().trim().to_string(),
            surname: self.fields[SURNAME].value().trim().to_string(),
            email: self.fields[EMAIL].value().trim().to_string(),
            phone: self.fields[PHONE].value().trim().to_string(),
            address: self.fields[ADDRESS].value().trim().to_string(),
            rating1,
            rating2,
            rating3,
        };
        info!(?feedback, "contact form submitted");
        self.submitted = Some(feedback);

        if let Some(tx) = &self.tx {
            tx.send(Action::Notice("Thank you! Your feedback was submitted.".into()))
                .ok();
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<EventResponse<Action>> {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % FIELD_COUNT;
                Some(EventResponse::Stop(Action::Render))
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + FIELD_COUNT - 1) % FIELD_COUNT;
                Some(EventResponse::Stop(Action::Render))
            }
            KeyCode::Enter => {
                self.submit();
                Some(EventResponse::Stop(Action::Render))
            }
            KeyCode::Char(_)
            | KeyCode::Backspace
            | KeyCode::Delete
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Home
            | KeyCode::End => {
                self.fields[self.focus].handle_key(key);
                if self.focus == PHONE {
                    let masked = mask_phone(self.fields[PHONE].value());
                    self.fields[PHONE].set_value(masked);
                }
                self.validate_field(self.focus);
                Some(EventResponse::Stop(Action::Render))
            }
            _ => None,
        }
    }
}

impl Page for ContactPage {
    fn name(&self) -> &'static str {
        "contact"
    }

    fn id(&self) -> PageId {
        PageId::Contact
    }

    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.tx = Some(tx);
        Ok(())
    }

    fn handle_events(&mut self, event: Option<Event>) -> Result<Option<EventResponse<Action>>> {
        match event {
            Some(Event::Key(key)) => Ok(self.handle_key(key)),
            _ => Ok(None),
        }
    }

    fn hints(&self) -> &'static str {
        "Tab/↓ next · S-Tab/↑ prev · Enter submit · F3 game · Ctrl+C quit "
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let rows = Layout::vertical([
            Constraint::Length(13), // form grid
            Constraint::Fill(1),    // summary
        ])
        .split(area);

        self.draw_form(frame, rows[0]);
        self.draw_summary(frame, rows[1]);
        Ok(())
    }
}

impl ContactPage {
    fn draw_form(&self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        // Two columns of four fields; focus order runs down the left column
        // first, matching the original form's field order.
        for (index, field) in self.fields.iter().enumerate() {
            let column = columns[index / 4];
            let cell = Rect {
                x: column.x,
                y: column.y + (index % 4) as u16 * 3,
                width: column.width,
                height: 3.min(column.height.saturating_sub((index % 4) as u16 * 3)),
            };
            if cell.height == 0 {
                continue;
            }
            field.draw(frame, cell, index == self.focus, &self.theme);
        }

        // Submit state line under the grid.
        let status_y = area.y + 12;
        if status_y < area.bottom() {
            let status = Rect {
                x: area.x,
                y: status_y,
                width: area.width,
                height: 1,
            };
            let (text, style) = if self.can_submit() {
                ("Enter — submit", self.theme.success_text())
            } else {
                ("Fill every field to enable submit", self.theme.dimmed())
            };
            frame.render_widget(Paragraph::new(text).style(style).centered(), status);
        }
    }

    fn draw_summary(&self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title("Summary")
            .title_style(self.theme.title())
            .border_set(border::ROUNDED)
            .border_style(self.theme.border());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(feedback) = &self.submitted else {
            let placeholder = Paragraph::new("Submit the form to see the summary here.")
                .style(self.theme.dimmed());
            frame.render_widget(placeholder, inner);
            return;
        };

        let label = |text: &'static str| Span::styled(text, self.theme.title());
        let (average, band) = feedback.average();
        let mut lines = vec![
            Line::from(vec![label("Name: "), Span::raw(feedback.name.clone())]),
            Line::from(vec![label("Surname: "), Span::raw(feedback.surname.clone())]),
            Line::from(vec![
                label("Email: "),
                Span::styled(feedback.email.clone(), self.theme.link()),
            ]),
            Line::from(vec![label("Phone number: "), Span::raw(feedback.phone.clone())]),
            Line::from(vec![label("Address: "), Span::raw(feedback.address.clone())]),
            Line::from(vec![
                label("Service quality: "),
                Span::raw(feedback.rating1.to_string()),
            ]),
            Line::from(vec![
                label("Communication: "),
                Span::raw(feedback.rating2.to_string()),
            ]),
            Line::from(vec![
                label("Reliability: "),
                Span::raw(feedback.rating3.to_string()),
            ]),
            Line::default(),
            Line::from(vec![
                Span::styled(
                    format!("{} {}: ", feedback.name, feedback.surname),
                    self.theme.text(),
                ),
                Span::styled(format!("{average:.1}"), self.theme.band(band)),
            ]),
        ];
        lines.truncate(inner.height as usize);
        frame.render_widget(Paragraph::new(lines).style(self.theme.text()), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc;

    fn filled_page() -> ContactPage {
        let mut page = ContactPage::new().unwrap();
        let values = [
            "Jonas",
            "Basanavičius",
            "jonas@example.com",
            "+370 612 34567",
            "Gedimino pr. 1, Vilnius",
            "8",
            "6",
            "10",
        ];
        for (index, value) in values.iter().enumerate() {
            page.fields[index].set_value(value.to_string());
            page.validate_field(index);
        }
        page
    }

    #[test]
    fn valid_form_submits_and_notifies() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut page = filled_page();
        page.register_action_handler(tx).unwrap();
        assert!(page.can_submit());

        page.submit();

        let feedback = page.submitted.as_ref().expect("summary should be rendered");
        assert_eq!(feedback.name, "Jonas");
        assert_eq!(feedback.phone, "+370 612 34567");
        assert_eq!(feedback.average_text(), "8.0");
        assert_eq!(
            rx.try_recv().unwrap(),
            Action::Notice("Thank you! Your feedback was submitted.".into())
        );
    }

    #[test]
    fn any_invalid_field_makes_submit_a_no_op() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut page = filled_page();
        page.register_action_handler(tx).unwrap();
        page.fields[RATING2].set_value("11".into());

        page.submit();

        assert!(page.submitted.is_none());
        assert!(rx.try_recv().is_err());
        assert!(!page.can_submit());
    }

    #[test]
    fn empty_form_cannot_submit() {
        let page = ContactPage::new().unwrap();
        assert!(!page.can_submit());
    }

    #[test]
    fn typing_into_phone_masks_the_value() {
        use crossterm::event::{KeyCode, KeyEvent};
        let mut page = ContactPage::new().unwrap();
        page.focus = PHONE;
        // Each keystroke re-masks the already-masked field, so the first "8"
        // becomes part of the subscriber tail instead of a stripped "86" prefix.
        for c in "861234567".chars() {
            page.handle_key(KeyEvent::from(KeyCode::Char(c)));
        }
        assert_eq!(page.fields[PHONE].value(), "+370 686 12345");
        assert_eq!(page.fields[PHONE].error(), None);
    }

    #[test]
    fn pasted_phone_masks_as_one_batch() {
        let mut page = ContactPage::new().unwrap();
        page.fields[PHONE].set_value(mask_phone("861234567"));
        page.validate_field(PHONE);
        assert_eq!(page.fields[PHONE].value(), "+370 612 34567");
        assert_eq!(page.fields[PHONE].error(), None);
    }

    #[test]
    fn partial_phone_shows_format_error() {
        use crossterm::event::{KeyCode, KeyEvent};
        let mut page = ContactPage::new().unwrap();
        page.focus = PHONE;
        for c in "8612".chars() {
            page.handle_key(KeyEvent::from(KeyCode::Char(c)));
        }
        assert_eq!(page.fields[PHONE].value(), "+370 686 12");
        assert_eq!(
            page.fields[PHONE].error(),
            Some("Format must be like +370 6xx xxxxx.")
        );
    }
}
