//! Spotify Web API integration: token exchange, track search and track
//! detail lookup.

pub mod adapter;
pub mod auth;
pub mod client;
pub mod dto;

pub use auth::TokenProvider;
pub use client::SpotifyClient;
