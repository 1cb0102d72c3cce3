/// A key press as seen by the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    Backspace,
    Tab,
    Char(char),
    /// Any other named key (arrows, function keys, modifiers).
    Ignored,
}

impl Key {
    /// Maps a key name: "Escape", "Backspace" and "Tab" are special, a single
    /// character is typed, anything longer is ignored.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" => Key::Escape,
            "Backspace" => Key::Backspace,
            "Tab" => Key::Tab,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Key::Char(ch),
                    _ => Key::Ignored,
                }
            }
        }
    }
}
