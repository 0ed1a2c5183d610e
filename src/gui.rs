use crate::{
    chart::{self, DrawOp, PathRecorder},
    display::Display,
    gui_data::GuiData,
};
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::{io, sync::mpsc, time::Duration};
use tui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Span, Spans},
    widgets::{
        canvas::{Canvas, Line},
        Block, Borders, Paragraph, Row, Table, Wrap,
    },
    Frame, Terminal,
};

const MAX_LOG_LINES: usize = 100;
/// Logical size of the chart surface; the canvas scales it to the widget.
const CHART_WIDTH: f64 = 600.0;
const CHART_HEIGHT: f64 = 240.0;

/// Requests sent from the dashboard back to the simulation loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Toggle,
    CycleAlgorithm,
    Quit,
}

pub struct Gui {
    log_rx: mpsc::Receiver<String>,
    log_messages: Vec<String>,
    gui_data_rx: mpsc::Receiver<GuiData>,
    command_tx: mpsc::Sender<Command>,
    current_gui_data: GuiData,
}

impl Gui {
    pub fn new(
        log_rx: mpsc::Receiver<String>,
        gui_data_rx: mpsc::Receiver<GuiData>,
        command_tx: mpsc::Sender<Command>,
    ) -> Self {
        Self {
            log_rx,
            log_messages: Vec::new(),
            gui_data_rx,
            command_tx,
            current_gui_data: GuiData::default(),
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_app(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        // Let the simulation loop wind down however we got here.
        let _ = self.command_tx.send(Command::Quit);

        result
    }

    fn run_app(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        let mut last_update = std::time::Instant::now();

        loop {
            let now = std::time::Instant::now();
            let should_update = (now - last_update).as_millis() >= 250;

            while let Ok(msg) = self.log_rx.try_recv() {
                self.add_log_message(msg);
            }

            while let Ok(data) = self.gui_data_rx.try_recv() {
                self.current_gui_data = data;
            }

            if event::poll(Duration::from_millis(10))? {
                if let Event::Key(key) = event::read()? {
                    let ctrl_c = key.code == KeyCode::Char('c')
                        && key.modifiers.contains(event::KeyModifiers::CONTROL);
                    match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        _ if ctrl_c => return Ok(()),
                        KeyCode::Char('s') | KeyCode::Char(' ') => self.send(Command::Toggle),
                        KeyCode::Char('a') => self.send(Command::CycleAlgorithm),
                        _ => {}
                    }
                }
                if !should_update {
                    terminal.draw(|f| self.ui(f))?;
                    last_update = now;
                }
            }

            if should_update {
                terminal.draw(|f| self.ui(f))?;
                last_update = now;
            }

            std::thread::sleep(Duration::from_millis(10));
        }
    }

    fn send(&mut self, command: Command) {
        if self.command_tx.send(command).is_err() {
            self.add_log_message("ERROR: simulation loop is gone".to_string());
        }
    }

    fn ui(&self, f: &mut Frame<CrosstermBackend<io::Stdout>>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(
                [
                    Constraint::Length(3),      // Banner
                    Constraint::Length(9),      // Stats & workers
                    Constraint::Percentage(55), // Chart
                    Constraint::Min(5),         // Log output
                    Constraint::Length(1),      // Footer
                ]
                .as_ref(),
            )
            .split(f.size());

        let data = &self.current_gui_data;

        let status_color = if data.is_active { Color::Green } else { Color::Red };
        let banner = Paragraph::new(Spans::from(vec![
            Span::styled("MineSim v0.1.0 - Simulated Mining Dashboard  ", Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("● {}", Display::status_text(data.is_active)),
                Style::default().fg(status_color),
            ),
        ]))
        .alignment(tui::layout::Alignment::Center);
        f.render_widget(banner, chunks[0]);

        let main_content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)].as_ref())
            .split(chunks[1]);

        let hash_rate_str = Display::format_hash_rate(data.hash_rate);
        let power_str = Display::format_power(data.power_usage);
        let workers_str = data.active_workers.to_string();
        let today_str = Display::format_btc(data.earnings_today);
        let balance_str = Display::format_btc(data.total_balance);
        let runtime_str = Display::format_duration(Duration::from_secs(data.ticks));

        let stats = vec![
            Row::new(vec!["Algorithm", data.algorithm.as_str()]),
            Row::new(vec!["Hash Rate", &hash_rate_str]),
            Row::new(vec!["Power Usage", &power_str]),
            Row::new(vec!["Active Workers", &workers_str]),
            Row::new(vec!["Earnings Today", &today_str]),
            Row::new(vec!["Total Balance", &balance_str]),
            Row::new(vec!["Runtime", &runtime_str]),
        ];
        let stats_table = Table::new(stats)
            .header(Row::new(vec!["Metric", "Value"]).style(Style::default().fg(Color::Yellow)))
            .block(Block::default().title("Mining Stats").borders(Borders::ALL))
            .widths(&[Constraint::Percentage(45), Constraint::Percentage(55)]);
        f.render_widget(stats_table, main_content_chunks[0]);

        let worker_rows: Vec<Row> = data
            .workers
            .iter()
            .map(|w| {
                Row::new(vec![
                    w.name.clone(),
                    w.gpu.clone(),
                    Display::format_worker_hash_rate(w.hash_rate, data.is_active),
                    Display::format_temperature(w.temperature, data.is_active),
                ])
            })
            .collect();
        let workers_table = Table::new(worker_rows)
            .header(Row::new(vec!["Worker", "GPU", "Hash", "Temp"]).style(Style::default().fg(Color::Yellow)))
            .block(Block::default().title("Workers").borders(Borders::ALL))
            .widths(&[
                Constraint::Percentage(22),
                Constraint::Percentage(38),
                Constraint::Percentage(25),
                Constraint::Percentage(15),
            ]);
        f.render_widget(workers_table, main_content_chunks[1]);

        let mut recorder = PathRecorder::new(CHART_WIDTH, CHART_HEIGHT);
        chart::render(&data.history, &mut recorder);
        let canvas_chart = CanvasChart::from_ops(recorder.ops(), CHART_HEIGHT);
        let chart_widget = Canvas::default()
            .block(Block::default().title("Hash Rate (last 60s)").borders(Borders::ALL))
            .x_bounds([0.0, CHART_WIDTH])
            .y_bounds([0.0, CHART_HEIGHT])
            .paint(|ctx| {
                for segment in &canvas_chart.area {
                    ctx.draw(&segment.to_line(Color::DarkGray));
                }
                for segment in &canvas_chart.stroke {
                    ctx.draw(&segment.to_line(Color::Blue));
                }
                for (text, x, y) in &canvas_chart.labels {
                    ctx.print(*x, *y, Span::styled(text.clone(), Style::default().fg(Color::Gray)));
                }
            });
        f.render_widget(chart_widget, chunks[2]);

        let log_spans: Vec<Spans> = self
            .log_messages
            .iter()
            .rev()
            .take(MAX_LOG_LINES)
            .map(|s| {
                let span = if s.starts_with("ERROR:") {
                    Span::styled(s, Style::default().fg(Color::Red))
                } else {
                    Span::raw(s)
                };
                Spans::from(span)
            })
            .collect();

        let log_widget = Paragraph::new(log_spans)
            .block(Block::default().title("Terminal Output").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(log_widget, chunks[3]);

        let footer = Paragraph::new("'s' start/stop  'a' switch algorithm  'q' quit")
            .style(Style::default().fg(Color::Gray))
            .alignment(tui::layout::Alignment::Center);
        f.render_widget(footer, chunks[4]);
    }

    fn add_log_message(&mut self, msg: String) {
        for line in msg.lines() {
            if !line.trim().is_empty() {
                self.log_messages.push(line.to_string());
            }
        }
        if self.log_messages.len() > MAX_LOG_LINES {
            let drain = self.log_messages.len() - MAX_LOG_LINES;
            self.log_messages.drain(0..drain);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Segment {
    from: (f64, f64),
    to: (f64, f64),
}

impl Segment {
    fn to_line(self, color: Color) -> Line {
        Line {
            x1: self.from.0,
            y1: self.from.1,
            x2: self.to.0,
            y2: self.to.1,
            color,
        }
    }
}

/// Recorded chart path converted to canvas space, where y grows upwards.
/// The canvas cannot fill, so the area is traced by its closing edges only:
/// the curve belongs to `stroke` and is not repeated in `area`.
#[derive(Debug, Default)]
struct CanvasChart {
    stroke: Vec<Segment>,
    area: Vec<Segment>,
    labels: Vec<(String, f64, f64)>,
}

impl CanvasChart {
    fn from_ops(ops: &[DrawOp], height: f64) -> Self {
        let flip = |x: f64, y: f64| (x, height - y);
        let mut chart = CanvasChart::default();
        let mut pending = Vec::new();
        let mut cursor = None;
        let mut path_start = None;

        for op in ops {
            match op {
                DrawOp::Clear => chart = CanvasChart::default(),
                DrawOp::BeginPath => {
                    pending.clear();
                    cursor = None;
                    path_start = None;
                }
                DrawOp::MoveTo(x, y) => {
                    cursor = Some(flip(*x, *y));
                    path_start = cursor;
                }
                DrawOp::LineTo(x, y) => {
                    let to = flip(*x, *y);
                    if let Some(from) = cursor {
                        pending.push(Segment { from, to });
                    }
                    cursor = Some(to);
                }
                DrawOp::Stroke => chart.stroke.append(&mut pending),
                DrawOp::ClosePath => {
                    if let (Some(from), Some(to)) = (cursor, path_start) {
                        pending.push(Segment { from, to });
                        cursor = Some(to);
                    }
                }
                DrawOp::Fill => chart.area.append(&mut pending),
                DrawOp::Text { text, x, y } => {
                    let (x, y) = flip(*x, *y);
                    chart.labels.push((text.clone(), x, y));
                }
            }
        }
        chart
    }
}
