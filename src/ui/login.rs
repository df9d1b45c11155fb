use crate::app::{App, LoginField};
use crate::ui::layout::calculate_login_chunks;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_login(f: &mut Frame, app: &App) {
    let layout = calculate_login_chunks(f.area());

    let title = Paragraph::new("JLPT Flashcards - Login or Sign Up")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.title_area);

    let field_style = |focused: bool| {
        if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    };

    let email = Paragraph::new(app.login.email.as_str())
        .style(field_style(app.login.focus == LoginField::Email))
        .block(Block::default().borders(Borders::ALL).title("Email"));
    f.render_widget(email, layout.email_area);

    let masked: String = app.login.password.chars().map(|_| '•').collect();
    let password = Paragraph::new(masked)
        .style(field_style(app.login.focus == LoginField::Password))
        .block(Block::default().borders(Borders::ALL).title("Password"));
    f.render_widget(password, layout.password_area);

    let status = if let Some(error) = &app.login.error {
        Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        ))
    } else if app.login.busy {
        Line::from("Contacting the server...")
    } else if let Some(notice) = &app.notice {
        Line::from(notice.as_str())
    } else {
        Line::from("")
    };
    f.render_widget(
        Paragraph::new(status).alignment(Alignment::Center),
        layout.error_area,
    );

    let help_text = vec![Line::from(vec![
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Sign In  "),
        Span::styled(
            "Ctrl+N",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Sign Up  "),
        Span::styled(
            "Tab",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Switch Field  "),
        Span::styled(
            "Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}
