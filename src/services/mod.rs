pub mod broadcast_service;
pub mod job_board_service;
pub mod telegram_service;
