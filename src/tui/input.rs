use crate::solver::SolverBackend;
use crate::tui::app::{App, Mode};
use crate::tui::tabs::Panel;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

pub fn handle_key<B: SolverBackend>(app: &mut App<B>, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    if app.mode() == Mode::EditingEdges {
        match key.code {
            KeyCode::Esc => app.commit_edit(),
            KeyCode::Enter => app.edit_push('\n'),
            KeyCode::Backspace => app.edit_backspace(),
            KeyCode::Char(c) => app.edit_push(c),
            _ => {}
        }
        return;
    }

    if let KeyCode::Char(c @ '1'..='6') = key.code {
        let index = c as usize - '1' as usize;
        app.switch_panel(Panel::ALL[index]);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Tab => app.next_panel(),
        _ if app.tabs().active() == Panel::Exercise => exercise_key(app, key.code),
        _ => solver_key(app, key.code),
    }
}

fn solver_key<B: SolverBackend>(app: &mut App<B>, code: KeyCode) {
    match code {
        KeyCode::Enter => app.solve(),
        KeyCode::Char('g') => app.generate_random(),
        KeyCode::Char('a') => app.animate(),
        KeyCode::Char('c') => app.cancel_animation(),
        KeyCode::Char('x') => app.clear_all(),
        KeyCode::Char('e') => app.begin_edit(),
        KeyCode::Char('+') => app.adjust_nodes(1),
        KeyCode::Char('-') => app.adjust_nodes(-1),
        KeyCode::Char('[') => app.shift_source(-1),
        KeyCode::Char(']') => app.shift_source(1),
        KeyCode::Char('{') => app.shift_sink(-1),
        KeyCode::Char('}') => app.shift_sink(1),
        KeyCode::Char('f') => app.show_formal(),
        KeyCode::Char('w') => app.show_narrative(),
        _ => {}
    }
}

fn exercise_key<B: SolverBackend>(app: &mut App<B>, code: KeyCode) {
    match code {
        KeyCode::Char('r') => app.new_exercise(),
        KeyCode::Char('d') => app.describe_exercise(),
        KeyCode::Char('u') => app.use_in_solver(),
        KeyCode::Char('[') => app.shift_exercise_source(-1),
        KeyCode::Char(']') => app.shift_exercise_source(1),
        KeyCode::Char('{') => app.shift_exercise_sink(-1),
        KeyCode::Char('}') => app.shift_exercise_sink(1),
        KeyCode::Char('<') => app.adjust_exercise_min(-1),
        KeyCode::Char('>') => app.adjust_exercise_min(1),
        KeyCode::Char(',') => app.adjust_exercise_max(-1),
        KeyCode::Char('.') => app.adjust_exercise_max(1),
        _ => {}
    }
}
