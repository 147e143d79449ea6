//! Seedable, domain-separated RNG streams for the stage calculators.
//!
//! Each stochastic decision point gets its own stream so that draws in one
//! stage can never shift the draws of another: replaying a session with the
//! same seed and the same decisions reproduces every result bit for bit.

use std::cell::{RefCell, RefMut};

use hmac::{Hmac, Mac};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::Sha256;

/// Counting wrapper for RNG streams providing instrumentation.
///
/// The draw count doubles as a replay cursor: restoring a session snapshot
/// fast-forwards each stream by its recorded count.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl CountingRng<ChaCha8Rng> {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            draws: 0,
        }
    }
}

impl<R: RngCore> CountingRng<R> {
    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: RngCore> RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws += 1;
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws += 1;
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws += 1;
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws += 1;
        self.rng.try_fill_bytes(dest)
    }
}

/// Derive a per-stream seed from the user seed and a domain tag.
fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()).expect("64-bit seed is valid key");
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

/// Bundle of independent streams, one per stochastic decision point.
#[derive(Debug)]
pub struct StageRngBundle {
    demand: RefCell<CountingRng<ChaCha8Rng>>,
    sourcing: RefCell<CountingRng<ChaCha8Rng>>,
    delivery: RefCell<CountingRng<ChaCha8Rng>>,
}

impl StageRngBundle {
    /// Construct the bundle from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        let demand = CountingRng::new(derive_stream_seed(seed, b"demand"));
        let sourcing = CountingRng::new(derive_stream_seed(seed, b"sourcing-delay"));
        let delivery = CountingRng::new(derive_stream_seed(seed, b"delivery-delay"));
        Self {
            demand: RefCell::new(demand),
            sourcing: RefCell::new(sourcing),
            delivery: RefCell::new(delivery),
        }
    }

    /// Access the demand-variation stream (Planning).
    #[must_use]
    pub fn demand(&self) -> RefMut<'_, CountingRng<ChaCha8Rng>> {
        self.demand.borrow_mut()
    }

    /// Access the supplier-delay stream (Sourcing).
    #[must_use]
    pub fn sourcing(&self) -> RefMut<'_, CountingRng<ChaCha8Rng>> {
        self.sourcing.borrow_mut()
    }

    /// Access the transport-delay stream (Delivery).
    #[must_use]
    pub fn delivery(&self) -> RefMut<'_, CountingRng<ChaCha8Rng>> {
        self.delivery.borrow_mut()
    }

    /// Draw counts per stream, in (demand, sourcing, delivery) order.
    #[must_use]
    pub fn draw_counts(&self) -> [u64; 3] {
        [
            self.demand.borrow().draws(),
            self.sourcing.borrow().draws(),
            self.delivery.borrow().draws(),
        ]
    }

    /// Fast-forward each stream by the given number of recorded draws.
    ///
    /// Used on snapshot restore so a resumed session continues the same
    /// deterministic sequence instead of replaying consumed draws.
    pub fn fast_forward(&self, counts: [u64; 3]) {
        let streams = [&self.demand, &self.sourcing, &self.delivery];
        for (stream, count) in streams.into_iter().zip(counts) {
            let mut rng = stream.borrow_mut();
            for _ in 0..count {
                let _ = rng.next_u64();
            }
            // One call per recorded draw; counts now match the snapshot.
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn streams_are_independent_and_reproducible() {
        let a = StageRngBundle::from_user_seed(0xC0FFEE);
        let b = StageRngBundle::from_user_seed(0xC0FFEE);

        let a_demand: f64 = a.demand().gen_range(0.90..=1.15);
        let b_demand: f64 = b.demand().gen_range(0.90..=1.15);
        assert!((a_demand - b_demand).abs() < f64::EPSILON);

        // Consuming the sourcing stream must not shift the delivery stream.
        let _ = a.sourcing().gen_bool(0.5);
        let a_delivery = a.delivery().next_u64();
        let b_delivery = b.delivery().next_u64();
        assert_eq!(a_delivery, b_delivery);
    }

    #[test]
    fn different_seeds_give_different_streams() {
        let a = StageRngBundle::from_user_seed(1);
        let b = StageRngBundle::from_user_seed(2);
        assert_ne!(a.demand().next_u64(), b.demand().next_u64());
    }

    #[test]
    fn fast_forward_resumes_the_sequence() {
        let live = StageRngBundle::from_user_seed(99);
        let _ = live.demand().next_u64();
        let _ = live.demand().next_u64();
        let counts = live.draw_counts();
        assert_eq!(counts, [2, 0, 0]);

        let restored = StageRngBundle::from_user_seed(99);
        restored.fast_forward(counts);
        assert_eq!(restored.demand().next_u64(), live.demand().next_u64());
        assert_eq!(restored.draw_counts(), live.draw_counts());
    }
}
