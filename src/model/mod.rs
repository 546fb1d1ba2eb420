pub mod attendance;
pub mod audit;
pub mod salary;
pub mod staff;
