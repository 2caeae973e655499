//! Connection authentication: the token verifier port and the gate that
//! admits or rejects each inbound connection.

pub mod box_verifier;
pub mod gate;
pub mod verifier;
