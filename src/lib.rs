//! lesson-guard: serves a catalog of video lessons and keeps each lesson's
//! video id behind an encrypted, client-opaque token until the client asks
//! for it to be resolved.

pub mod config;
pub mod error;
pub mod response;
pub mod routes;
pub mod state;
#[cfg(test)]
pub mod testutil;

pub mod crypto {
    pub mod aes;
    pub mod checksum;
    pub mod guard;
}

pub mod models {
    pub mod lesson;
    pub mod token;
}

pub mod repositories {
    pub mod lesson;
}

pub mod services {
    pub mod lessons;
}

pub mod handlers {
    pub mod health;
    pub mod lessons;
}

pub mod middleware_layer {
    pub mod rate_limit;
}
