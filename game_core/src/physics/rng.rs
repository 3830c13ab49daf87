//! Path: game_core/src/physics/rng.rs
//! Summary: 決定論的 LCG 乱数ジェネレータ（no-std 互換）

#[derive(Clone, Debug)]
pub struct SimpleRng(u64);

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.0 = self.0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }

    /// [0, 1) の一様乱数
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// [0, n) の整数。n == 0 のときは 0
    pub fn below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.next_u32() % n
    }

    /// 確率 `p` で true
    pub fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    /// 重み付き抽選。重み合計が 0 なら None
    pub fn pick_weighted(&mut self, weights: &[u32]) -> Option<usize> {
        let total: u32 = weights.iter().sum();
        if total == 0 {
            return None;
        }
        let mut roll = self.below(total);
        for (i, &w) in weights.iter().enumerate() {
            if roll < w {
                return Some(i);
            }
            roll -= w;
        }
        None
    }

    /// セーブ用に内部状態を取り出す
    pub fn state(&self) -> u64 {
        self.0
    }
}
