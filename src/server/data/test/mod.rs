mod schedule;
mod snapshot;
