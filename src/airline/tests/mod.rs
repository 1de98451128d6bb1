mod booking;
mod proptests;
mod utils;
