use std::error::Error;
use std::io;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::time::Instant;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use zoo_spell_quest::{
    logger, spawn_worker, App, AppConfig, HttpIllustrations, OpenRouterClient, TerminalAudio,
    WorkerResponse, WorkerTimeouts,
};

fn main() -> Result<(), Box<dyn Error>> {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("zoo-spell-quest: {}", e);
            std::process::exit(1);
        }
    };

    logger::init(&config.log_path);
    logger::log(&format!("Starting with model {}", config.model.model));

    let client = OpenRouterClient::new(config.model.clone(), &config.language)?;
    let (request_tx, request_rx) = mpsc::channel();
    let (response_tx, response_rx) = mpsc::channel();
    let _worker = spawn_worker(
        Arc::new(client),
        Arc::new(HttpIllustrations::new()),
        WorkerTimeouts {
            content: config.content_timeout,
            media: config.media_timeout,
        },
        response_tx,
        request_rx,
    )?;

    let audio = TerminalAudio::new(config.sound, config.speech);
    let mut app = App::new(config, Box::new(audio), request_tx);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, &response_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        logger::log(&format!("Event loop failed: {}", e));
    }
    logger::log("Exiting");
    result.map_err(Into::into)
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    responses: &Receiver<WorkerResponse>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| zoo_spell_quest::ui::draw(f, app))?;

        loop {
            match responses.try_recv() {
                Ok(response) => app.handle_worker_response(response),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    logger::log("Worker disconnected");
                    break;
                }
            }
        }

        let now = Instant::now();
        app.fire_due_timers(now);
        app.on_tick(now);

        if event::poll(app.poll_timeout(Instant::now()))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key, Instant::now());
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
