use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct LoginLayout {
    pub title_area: Rect,
    pub email_area: Rect,
    pub password_area: Rect,
    pub error_area: Rect,
    pub help_area: Rect,
}

pub struct QuizLayout {
    pub header_area: Rect,
    pub card_area: Rect,
    pub choices_area: Rect,
    pub status_area: Rect,
    pub help_area: Rect,
}

pub struct FormLayout {
    pub title_area: Rect,
    pub field_areas: [Rect; 4],
    pub status_area: Rect,
    pub help_area: Rect,
}

pub fn calculate_login_chunks(area: Rect) -> LoginLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(area);

    LoginLayout {
        title_area: chunks[0],
        email_area: chunks[1],
        password_area: chunks[2],
        error_area: chunks[3],
        help_area: chunks[5],
    }
}

pub fn calculate_quiz_chunks(area: Rect) -> QuizLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(8),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    QuizLayout {
        header_area: chunks[0],
        card_area: chunks[1],
        choices_area: chunks[2],
        status_area: chunks[3],
        help_area: chunks[4],
    }
}

pub fn calculate_form_chunks(area: Rect) -> FormLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    FormLayout {
        title_area: chunks[0],
        field_areas: [chunks[1], chunks[2], chunks[3], chunks[4]],
        status_area: chunks[5],
        help_area: chunks[7],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_layout() {
        let layout = calculate_login_chunks(Rect::new(0, 0, 80, 30));
        assert_eq!(layout.title_area.height, 3);
        assert_eq!(layout.email_area.height, 3);
        assert_eq!(layout.password_area.height, 3);
        assert_eq!(layout.help_area.height, 3);
    }

    #[test]
    fn test_quiz_layout() {
        let layout = calculate_quiz_chunks(Rect::new(0, 0, 100, 40));
        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.choices_area.height, 8);
        assert!(layout.card_area.height >= 6);
    }

    #[test]
    fn test_form_layout() {
        let layout = calculate_form_chunks(Rect::new(0, 0, 80, 30));
        for field in layout.field_areas {
            assert_eq!(field.height, 3);
        }
    }
}
