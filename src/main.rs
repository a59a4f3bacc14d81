use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use typeahead::span::{Span, SpanLine};
use typeahead::style::{Color, Style};
use typeahead::terminal::{CursorPos, KeyCode, KeyModifiers, Terminal, TerminalEvent};
use typeahead::widget::lookup::LookupSource;
use typeahead::{AutocompleteInput, Candidate, WidgetBounds};

const WIDGET_ROW: u16 = 3;
const WIDGET_WIDTH: u16 = 44;
const SELECTED_ROW: usize = 16;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
    }
}

fn run() -> io::Result<()> {
    let mut terminal = Terminal::new()?;
    terminal.enter()?;
    let result = event_loop(&mut terminal);
    let exit_result = terminal.exit();
    result.and(exit_result)
}

/// The mock data set: simulated latency, case-insensitive containment
/// filter.
fn mock_source() -> Arc<dyn LookupSource> {
    const ITEMS: [(i64, &str, &str); 10] = [
        (1, "Apple", "Fruit"),
        (2, "Banana", "Fruit"),
        (3, "Orange", "Fruit"),
        (4, "Carrot", "Vegetable"),
        (5, "Broccoli", "Vegetable"),
        (6, "Cucumber", "Vegetable"),
        (7, "Chocolate", "Dessert"),
        (8, "Ice Cream", "Dessert"),
        (9, "Cake", "Dessert"),
        (10, "Bread", "Bakery"),
    ];

    Arc::new(|query: &str| {
        std::thread::sleep(Duration::from_millis(500));
        let needle = query.to_lowercase();
        Ok(ITEMS
            .iter()
            .filter(|(_, name, _)| name.to_lowercase().contains(&needle))
            .map(|(id, name, category)| Candidate::new(*id, *name).with_field("category", *category))
            .collect())
    })
}

fn event_loop(terminal: &mut Terminal) -> io::Result<()> {
    let mut widget = AutocompleteInput::new(mock_source())
        .with_placeholder("Search fruits, vegetables...")
        .with_min_chars(2);
    widget.set_bounds(WidgetBounds::new(WIDGET_ROW, 0, WIDGET_WIDTH));

    let mut redraw = true;
    loop {
        if redraw {
            render(terminal, &widget)?;
            redraw = false;
        }

        let now = Instant::now();
        let mut timeout = Duration::from_millis(100);
        if let Some(deadline) = widget.deadline() {
            timeout = timeout.min(deadline.saturating_duration_since(now));
        }

        match terminal.poll_event(timeout)? {
            TerminalEvent::Key(key) => {
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    break;
                }
                let result = widget.handle_key(key.code, key.modifiers, Instant::now());
                redraw |= result.request_render;
            }
            TerminalEvent::Mouse(mouse) => {
                let result = widget.handle_mouse(mouse);
                redraw |= result.request_render;
            }
            TerminalEvent::Resize(size) => {
                terminal.set_size(size);
                redraw = true;
            }
            TerminalEvent::Tick => {}
        }

        redraw |= widget.tick(Instant::now());
    }

    Ok(())
}

fn render(terminal: &mut Terminal, widget: &AutocompleteInput) -> io::Result<()> {
    let mut lines = Vec::<SpanLine>::new();

    lines.push(vec![Span::styled(
        "Autocomplete demo".to_string(),
        Style::new().bold(),
    )]);
    lines.push(vec![Span::styled(
        "Type to search. Arrows move, Enter selects, Esc closes, Ctrl+C quits.".to_string(),
        Style::new().color(Color::DarkGrey),
    )]);
    lines.push(Vec::new());

    let draw = widget.draw();
    let cursor = draw.cursor_offset.map(|offset| CursorPos {
        col: offset.min(u16::MAX as usize) as u16,
        row: WIDGET_ROW,
    });
    lines.extend(draw.lines);

    if let Some(candidate) = widget.selected() {
        while lines.len() < SELECTED_ROW {
            lines.push(Vec::new());
        }
        lines.push(vec![Span::styled(
            "Selected:".to_string(),
            Style::new().bold(),
        )]);
        let json = serde_json::to_string_pretty(candidate)
            .unwrap_or_else(|_| candidate.name.clone());
        for json_line in json.lines() {
            lines.push(vec![Span::styled(
                json_line.to_string(),
                Style::new().color(Color::Green),
            )]);
        }
    }

    terminal.present(&lines, cursor)
}
