use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Terminal,
};
use std::io;

use taskboard::client::api::RestApi;
use taskboard::client::board::Board;
use taskboard::config::Config;
use taskboard::models::task::TaskStatus;

struct App {
    board: Board,
    api: RestApi,
    selected_status: usize,
    selected_task: usize,
}

impl App {
    fn selected_column(&self) -> TaskStatus {
        TaskStatus::ALL[self.selected_status]
    }

    fn selected_id(&self) -> Option<String> {
        self.board
            .column(self.selected_column())
            .get(self.selected_task)
            .map(|task| task.id.clone())
    }

    fn clamp_selection(&mut self) {
        let len = self.board.column(self.selected_column()).len();
        if self.selected_task >= len {
            self.selected_task = len.saturating_sub(1);
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::from_env();
    let api = RestApi::new(config.api_url.clone());
    let mut board = Board::new();
    if let Err(err) = board.refresh(&api).await {
        eprintln!("Failed to load tasks from {}: {}", config.api_url, err);
        std::process::exit(1);
    }

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App {
        board,
        api,
        selected_status: 0,
        selected_task: 0,
    };

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("{:?}", err);
    }
    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![
                    Constraint::Percentage(33),
                    Constraint::Percentage(33),
                    Constraint::Percentage(34),
                ])
                .split(f.area());

            for (i, status) in TaskStatus::ALL.iter().enumerate() {
                let tasks = app.board.column(*status);
                let items: Vec<ListItem> = tasks
                    .iter()
                    .enumerate()
                    .map(|(row, task)| {
                        let style = if app.selected_status == i && app.selected_task == row {
                            Style::default()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::BOLD)
                        } else {
                            Style::default().fg(Color::White)
                        };
                        let mut spans = vec![Span::styled(&task.title, style)];
                        if !task.description.is_empty() {
                            spans.push(Span::styled(
                                format!(" ({})", task.description),
                                Style::default().fg(Color::DarkGray),
                            ));
                        }
                        ListItem::new(Line::from(spans))
                    })
                    .collect();

                let list = List::new(items).block(
                    Block::default()
                        .title(format!("{} ({})", status.label(), tasks.len()))
                        .borders(Borders::ALL)
                        .border_style(if app.selected_status == i {
                            Style::default().fg(Color::Cyan)
                        } else {
                            Style::default()
                        }),
                );

                f.render_widget(list, chunks[i]);
            }
        })?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()), // Quit
                KeyCode::Char('a') => {
                    // Add a new task to the selected column
                    if let Some(title) = prompt("Enter task title") {
                        if !title.is_empty() {
                            let description = prompt("Enter description").unwrap_or_default();
                            let status = app.selected_column();
                            let _ = app
                                .board
                                .add_task(&app.api, title, description, status)
                                .await;
                        }
                    }
                }
                KeyCode::Char('d') => {
                    if let Some(id) = app.selected_id() {
                        let _ = app.board.delete_task(&app.api, &id).await;
                        app.clamp_selection();
                    }
                }
                KeyCode::Char('r') => {
                    let _ = app.board.refresh(&app.api).await;
                    app.clamp_selection();
                }
                KeyCode::Left => {
                    if app.selected_status > 0 {
                        app.selected_status -= 1;
                        app.clamp_selection();
                    }
                }
                KeyCode::Right => {
                    if app.selected_status < TaskStatus::ALL.len() - 1 {
                        app.selected_status += 1;
                        app.clamp_selection();
                    }
                }
                KeyCode::Up => {
                    if app.selected_task > 0 {
                        app.selected_task -= 1;
                    }
                }
                KeyCode::Down => {
                    let max_tasks = app.board.column(app.selected_column()).len();
                    if max_tasks > 0 && app.selected_task < max_tasks - 1 {
                        app.selected_task += 1;
                    }
                }
                KeyCode::Enter => {
                    // Move to the next status
                    if let (Some(id), Some(dest)) = (app.selected_id(), app.selected_column().next())
                    {
                        let end = app.board.column(dest).len();
                        let _ = app.board.move_task(&app.api, &id, dest, end).await;
                        app.clamp_selection();
                    }
                }
                KeyCode::Backspace => {
                    // Move to the previous status
                    if let (Some(id), Some(dest)) = (app.selected_id(), app.selected_column().prev())
                    {
                        let end = app.board.column(dest).len();
                        let _ = app.board.move_task(&app.api, &id, dest, end).await;
                        app.clamp_selection();
                    }
                }
                _ => {}
            }
        }
    }
}

fn prompt(message: &str) -> Option<String> {
    disable_raw_mode().ok();
    println!("{}", message);
    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_ok() {
        enable_raw_mode().ok();
        Some(input.trim().to_string())
    } else {
        enable_raw_mode().ok();
        None
    }
}
