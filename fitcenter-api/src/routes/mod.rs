/// API route handlers
///
/// - `health`: Health check endpoint
/// - `members`: Member CRUD
/// - `workouts`: Workout session create and listing

pub mod health;
pub mod members;
pub mod workouts;
