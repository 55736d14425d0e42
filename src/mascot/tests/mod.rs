mod helpers;
mod runtime;
