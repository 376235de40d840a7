// Stored résumés: one transactional write of the résumé and its sections,
// reads ordered newest first with sections by position.

pub mod create;
pub mod handlers;
pub mod query;
