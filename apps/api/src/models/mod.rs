pub mod maze;
pub mod subscription;
