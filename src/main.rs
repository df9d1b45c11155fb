use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use jlpt_flashcards::models::AppScreen;
use jlpt_flashcards::{logger, ui, App, Config};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::mpsc;
use std::time::Duration;

fn main() -> io::Result<()> {
    logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let (request_tx, request_rx) = mpsc::channel();
    let (response_tx, response_rx) = mpsc::channel();
    jlpt_flashcards::spawn_remote_worker(config, response_tx, request_rx);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(request_tx);

    loop {
        while let Ok(response) = response_rx.try_recv() {
            app.on_remote_response(response);
        }
        app.tick();

        terminal.draw(|f| match app.screen {
            AppScreen::Login => ui::draw_login(f, &app),
            AppScreen::Flashcards => ui::draw_quiz(f, &app),
            AppScreen::AddCard => ui::draw_add_card(f, &app),
        })?;

        // short poll so worker responses and the advance timer stay live
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
        {
            app.handle_key(key);
        }

        if app.should_quit {
            break;
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
