mod files;
mod help;
mod scatter;
mod stats;
mod story;

pub use files::draw_files_view;
pub use help::draw_help_overlay;
pub use scatter::draw_plot_view;
pub use stats::draw_stats_view;
pub use story::draw_story_view;
