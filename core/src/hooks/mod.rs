//! Frame instrumentation
//!
//! Each cooldown frame is subscribed once; observers the host refuses are
//! retried on the next scan. Cooldown updates are classified and
//! GCD sweeps are switched off on the spot. If the host later turns a flag back
//! on by itself, the flag observers re-classify and switch it off again within
//! the same call.
//!
//! Our own writes only ever switch a flag off, and the flag observers ignore
//! "off" notifications, so forced writes never trigger a revert of their own.

mod manager;


pub use manager::{DrawFlag, HookManager};
