//! Синтетические данные для бенчмарков.

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Журнал из `seconds` блоков активности по одной секунде при 30 Гц
/// (30 троек = 135 байт).
pub fn synthetic_log(seconds: u32) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut raw = Vec::with_capacity(seconds as usize * 144);

    for s in 0..seconds {
        let payload: Vec<u8> = (0..135).map(|_| rng.gen()).collect();
        raw.push(30);
        raw.push(0);
        raw.extend_from_slice(&s.to_le_bytes());
        raw.extend_from_slice(&(payload.len() as u16).to_le_bytes());
        raw.extend_from_slice(&payload);
        raw.push(0);
    }

    raw
}

/// Случайный буфер фиксированного размера.
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(7);
    (0..len).map(|_| rng.gen()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_log_size() {
        assert_eq!(synthetic_log(10).len(), 10 * (8 + 135 + 1));
        assert_eq!(random_bytes(5).len(), 5);
    }
}
