mod catalog;
mod conversations;
mod helpers;
mod status;
mod transactions;
