pub mod daily_client;
pub mod hourly_client;
pub mod ten_minute_client;
