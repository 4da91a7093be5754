/// Printed once at startup, before structured logging takes over.
pub const BANNER: &str = r#"
  __  __       ____       _         _  __
 |  \/  |_   _/ ___| __ _| |_ ___  | |/ /___  ___ _ __   ___ _ __
 | |\/| | | | | |  _ / _` | __/ _ \ | ' // _ \/ _ \ '_ \ / _ \ '__|
 | |  | | |_| | |_| | (_| | ||  __/ | . \  __/  __/ |_) |  __/ |
 |_|  |_|\__, |\____|\__,_|\__\___| |_|\_\___|\___| .__/ \___|_|
         |___/                                    |_|
"#;
