// Passgen services
// Services provide the stateless building blocks: charset construction, generation, scoring, settings.

pub mod charset_builder;
pub mod password_generator;
pub mod settings_engine;
pub mod strength_scorer;
