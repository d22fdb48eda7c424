mod idempotence;
mod report;
