


// Engine tests
mod engine;
