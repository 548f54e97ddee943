mod cache;
mod chronicle;
mod init;
mod partition;
mod summarize;
