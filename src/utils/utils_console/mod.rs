use colored::Colorize;

/// Prints the given string with the given color.
///
/// ## Example
/// ```
/// use scene_porter::utils::utils_console::{scene_print, PrintMode, PrintColor};
/// scene_print("test", PrintMode::Print, PrintColor::Blue, false);
/// ```
pub fn scene_print(s: &str, mode: PrintMode, color: PrintColor, bolded: bool) {
    let string = format_colored(s, &color, bolded);
    match mode {
        PrintMode::Println => { println!("{}", string); }
        PrintMode::Print => { print!("{}", string); }
    }
}

pub fn scene_print_new_line() {
    scene_print("\n", PrintMode::Print, PrintColor::None, false);
}

/// Prints a yellow warning line prefixed with the emitting component's name.
pub fn scene_warn(component: &str, s: &str) {
    scene_print(&format!("[{}] {}", component, s), PrintMode::Println, PrintColor::Yellow, false);
}

fn format_colored(s: &str, color: &PrintColor, bolded: bool) -> String {
    let mut string = if color == &PrintColor::None {
        s.normal()
    } else {
        let c = color.get_color_triple();
        s.truecolor(c.0, c.1, c.2)
    };
    if bolded { string = string.bold(); }
    string.to_string()
}

/// Enum that is used in scene_print function.
/// Println will cause a new line after each line, while Print will not.
#[derive(Clone, Debug)]
pub enum PrintMode {
    Println,
    Print
}

/// Defines color for a scene print command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PrintColor {
    None,
    Blue,
    Green,
    Red,
    Yellow,
    Cyan,
    Magenta
}
impl PrintColor {
    pub fn get_color_triple(&self) -> (u8, u8, u8) {
        match self {
            PrintColor::None => { (0,0,0) }
            PrintColor::Blue => { return (0, 0, 255) }
            PrintColor::Green => { return (0, 255, 0) }
            PrintColor::Red => { return (255, 0, 0) }
            PrintColor::Yellow => { return (255, 255, 0) }
            PrintColor::Cyan => { return (0, 255, 255) }
            PrintColor::Magenta => { return (255, 0, 255) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncolored_text_is_unchanged() {
        colored::control::set_override(false);
        assert_eq!(format_colored("plain", &PrintColor::None, false), "plain");
        colored::control::unset_override();
    }

    #[test]
    fn colored_text_keeps_content() {
        let s = format_colored("warn", &PrintColor::Yellow, true);
        assert!(s.contains("warn"));
    }
}
