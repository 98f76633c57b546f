mod keys;
mod request;

pub use keys::{KeyError, PublicKey, SecretKey, PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE};
pub use request::{
    unix_now, within_replay_window, CanonicalRequest, VerifyError, REPLAY_WINDOW_SECS,
    SIGNATURE_HEADER, TIME_HEADER,
};
