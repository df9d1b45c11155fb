use crate::app::App;
use crate::models::{Mode, Phase};
use crate::ui::layout::calculate_quiz_chunks;
use crate::utils::truncate_display;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_quiz(f: &mut Frame, app: &App) {
    let layout = calculate_quiz_chunks(f.area());
    let engine = &app.engine;

    let level = engine.filter().unwrap_or("All");
    let header_text = match engine.mode() {
        Mode::Practice => format!("Flashcards ({} MODE) - Level: {}", engine.mode().label(), level),
        _ => format!(
            "Flashcards ({} MODE) - Level: {} - Question {} / {}",
            engine.mode().label(),
            level,
            (engine.cursor() + 1).min(engine.active_len()),
            engine.active_len()
        ),
    };
    let header = Paragraph::new(header_text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    if engine.is_finished() {
        draw_result(f, app, &layout);
    } else {
        match engine.mode() {
            Mode::Practice => draw_practice_card(f, app, &layout),
            Mode::Test | Mode::Review => draw_question(f, app, &layout),
        }
    }

    let status = app.notice.as_deref().unwrap_or("");
    f.render_widget(
        Paragraph::new(status)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        layout.status_area,
    );

    let help = Paragraph::new(help_line(engine.mode(), engine.is_finished()))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

fn draw_practice_card(f: &mut Frame, app: &App, layout: &crate::ui::layout::QuizLayout) {
    let mut text = Text::default();
    match app.engine.current_card() {
        Some(card) => {
            text.push_line(Line::from(""));
            text.push_line(
                Line::from(Span::styled(
                    card.japanese.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Center),
            );
            text.push_line(Line::from(""));
            text.push_line(
                Line::from(Span::styled(
                    card.romaji.clone(),
                    Style::default().fg(Color::DarkGray),
                ))
                .alignment(Alignment::Center),
            );
            text.push_line(Line::from(card.english.clone()).alignment(Alignment::Center));
        }
        None => {
            text.push_line(Line::from(""));
            text.push_line(
                Line::from("No cards at this level - add one or change the filter")
                    .alignment(Alignment::Center),
            );
        }
    }

    let card_widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Card"));
    f.render_widget(card_widget, layout.card_area);

    f.render_widget(
        Paragraph::new("").block(Block::default().borders(Borders::ALL)),
        layout.choices_area,
    );
}

fn draw_question(f: &mut Frame, app: &App, layout: &crate::ui::layout::QuizLayout) {
    let engine = &app.engine;
    let Some(card) = engine.current_card() else {
        return;
    };

    let mut prompt = Text::default();
    prompt.push_line(Line::from(""));
    prompt.push_line(
        Line::from(Span::styled(
            card.japanese.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
    );
    let question = Paragraph::new(prompt)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("What does this mean?"),
        );
    f.render_widget(question, layout.card_area);

    let max_width = layout.choices_area.width.saturating_sub(8) as usize;
    let mut lines = Vec::new();
    for (i, choice) in engine.choices().iter().enumerate() {
        let label = format!("{}. {}", i + 1, truncate_display(choice, max_width));
        let style = if engine.phase() == Phase::Revealed {
            if *choice == card.english {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if engine.selected() == Some(choice.as_str()) {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::DarkGray)
            }
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(label, style)));
    }
    let choices = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Choices - Score: {}", engine.score())),
    );
    f.render_widget(choices, layout.choices_area);
}

fn draw_result(f: &mut Frame, app: &App, layout: &crate::ui::layout::QuizLayout) {
    let engine = &app.engine;
    let mut text = Text::default();
    text.push_line(Line::from(""));
    text.push_line(
        Line::from(Span::styled(
            format!("You scored {} / {}", engine.score(), engine.active_len()),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
    );
    text.push_line(Line::from(""));
    if engine.mistake_count() > 0 {
        text.push_line(
            Line::from(format!(
                "{} mistake(s) waiting - press r to review them",
                engine.mistake_count()
            ))
            .alignment(Alignment::Center),
        );
    } else {
        text.push_line(Line::from("A clean run!").alignment(Alignment::Center));
    }

    let result = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Result"));
    f.render_widget(result, layout.card_area);

    f.render_widget(
        Paragraph::new("").block(Block::default().borders(Borders::ALL)),
        layout.choices_area,
    );
}

fn help_line(mode: Mode, finished: bool) -> Line<'static> {
    let bold = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();
    if finished {
        spans.extend([
            Span::styled("p", bold),
            Span::from(" Practice  "),
            Span::styled("t", bold),
            Span::from(" New Test  "),
            Span::styled("r", bold),
            Span::from(" Review Mistakes  "),
        ]);
    } else {
        match mode {
            Mode::Practice => spans.extend([
                Span::styled("n", bold),
                Span::from(" Next  "),
                Span::styled("t", bold),
                Span::from(" Test  "),
                Span::styled("r", bold),
                Span::from(" Review  "),
                Span::styled("f", bold),
                Span::from(" Level  "),
                Span::styled("a", bold),
                Span::from(" Add Card  "),
            ]),
            Mode::Test | Mode::Review => spans.extend([
                Span::styled("1-4", bold),
                Span::from(" Answer  "),
                Span::styled("p", bold),
                Span::from(" Back to Practice  "),
            ]),
        }
    }
    spans.extend([
        Span::styled("l", bold),
        Span::from(" Logout  "),
        Span::styled("q", bold),
        Span::from(" Quit"),
    ]);
    Line::from(spans)
}
