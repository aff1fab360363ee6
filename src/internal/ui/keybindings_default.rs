use crate::api::PopularPeriod;
use crate::internal::ui::app::Action;
use crate::internal::ui::keybindings::{KeyBindingContext, KeyBindingMap};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use strum::IntoEnumIterator;

pub fn create_default_keybindings() -> KeyBindingMap {
    let mut map = KeyBindingMap::new();
    add_global_bindings(&mut map);
    add_list_bindings(&mut map);
    add_detail_bindings(&mut map);
    map
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

fn add_global_bindings(map: &mut KeyBindingMap) {
    let ctx = KeyBindingContext::Global;

    map.add_binding(
        ctx,
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        Action::Quit,
    );
    map.add_binding(ctx, key(KeyCode::Char('j')), Action::NavigateDown);
    map.add_binding(ctx, key(KeyCode::Down), Action::NavigateDown);
    map.add_binding(ctx, key(KeyCode::Char('k')), Action::NavigateUp);
    map.add_binding(ctx, key(KeyCode::Up), Action::NavigateUp);
    map.add_binding(ctx, key(KeyCode::Char('J')), Action::ScrollDetailDown);
    map.add_binding(ctx, key(KeyCode::PageDown), Action::ScrollDetailDown);
    map.add_binding(ctx, key(KeyCode::Char('K')), Action::ScrollDetailUp);
    map.add_binding(ctx, key(KeyCode::PageUp), Action::ScrollDetailUp);
    map.add_binding(ctx, key(KeyCode::Esc), Action::Back);
    map.add_binding(ctx, key(KeyCode::Char('o')), Action::OpenBrowser);
    map.add_binding(ctx, key(KeyCode::Char('i')), Action::OpenImage);
    map.add_binding(ctx, key(KeyCode::Char('r')), Action::Retry);
    map.add_binding(ctx, key(KeyCode::Char('?')), Action::ToggleHelp);
    map.add_binding(ctx, key(KeyCode::Char('x')), Action::ClearNotification);

    // 1/2/3 -> Today / Last 7 days / Last 30 days
    for (period, digit) in PopularPeriod::iter().zip(['1', '2', '3']) {
        map.add_binding(
            ctx,
            key(KeyCode::Char(digit)),
            Action::FetchDays(period.as_days()),
        );
    }
}

fn add_list_bindings(map: &mut KeyBindingMap) {
    let ctx = KeyBindingContext::List;
    map.add_binding(ctx, key(KeyCode::Enter), Action::Enter);
    map.add_binding(ctx, key(KeyCode::Char('q')), Action::Quit);
}

fn add_detail_bindings(map: &mut KeyBindingMap) {
    let ctx = KeyBindingContext::Detail;
    map.add_binding(ctx, key(KeyCode::Char('q')), Action::Back);
    map.add_binding(ctx, key(KeyCode::Backspace), Action::Back);
}
