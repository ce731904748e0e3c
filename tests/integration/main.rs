//! Integration test suites for the StayHub HTTP API.

mod helpers;

mod auth_test;
mod booking_test;
