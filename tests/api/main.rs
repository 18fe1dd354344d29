mod game;
mod health;
mod helpers;
