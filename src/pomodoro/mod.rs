pub mod pomodoro;
pub mod quotes;
pub mod session;
pub mod ticker;
pub mod timer;
