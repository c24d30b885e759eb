pub mod continuous_calendar;
pub mod day_detail_panel;
pub mod schedule_page;
pub mod time_selection_panel;
pub mod toast;

pub use continuous_calendar::ContinuousCalendar;
pub use day_detail_panel::DayDetailPanel;
pub use schedule_page::SchedulePage;
pub use time_selection_panel::TimeSelectionPanel;
pub use toast::Toast;
