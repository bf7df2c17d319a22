pub mod goal_input;
pub mod password;
