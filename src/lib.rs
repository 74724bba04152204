pub mod cli {
    pub mod commands;
    pub mod handlers;
    pub mod output;
}
pub mod io {
    pub mod config_io;
    pub mod hub_io;
    pub mod watcher;
}
pub mod model;
pub mod ops {
    pub mod check;
    pub mod search;
    pub mod sections;
    pub mod visibility;
}
pub mod tui;
pub mod util {
    pub mod unicode;
}
