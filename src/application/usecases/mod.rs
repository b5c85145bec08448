pub mod send_reminders;
