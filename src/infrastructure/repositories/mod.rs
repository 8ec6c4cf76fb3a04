//! Repository implementations using SeaORM

pub mod member_query;
pub mod member_repository;
pub mod team_repository;

pub use member_repository::SeaOrmMemberRepository;
pub use team_repository::SeaOrmTeamRepository;
