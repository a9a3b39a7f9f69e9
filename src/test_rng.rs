use rand::RngCore;

/// Rng that replays a fixed list of die faces, looping once it runs out.
pub(crate) struct ScriptedRng {
    values: Vec<u64>,
    position: usize,
}

impl ScriptedRng {
    /// Every `(face, sides)` pair is what the next die with that many sides will roll.
    pub(crate) fn faces(faces: &[(u32, u32)]) -> Self {
        Self {
            values: faces
                .iter()
                .map(|&(face, sides)| face_to_u64(face, sides))
                .collect(),
            position: 0,
        }
    }
}

// The middle of the face's interval, shifted the way rand turns a u64 into an f64
fn face_to_u64(face: u32, sides: u32) -> u64 {
    let fraction = (face as f64 - 0.5) / sides as f64;
    ((fraction * (1u64 << 53) as f64) as u64) << 11
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
