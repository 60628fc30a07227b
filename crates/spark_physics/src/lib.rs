pub mod connections;
pub mod forces;
pub mod motion;
pub mod particle;
