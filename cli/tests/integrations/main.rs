mod check;
mod eval;
mod repl;
mod run;
mod server;
mod suite;
