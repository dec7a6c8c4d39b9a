use rand::Rng;

/// Two distinct codeword positions whose XOR is one parity check.
pub type Pair = (u16, u16);

/// Longest supported codeword; positions must fit in a [`Pair`].
pub const MAX_CODEWORD_LEN: usize = 512;

/// Sample a pair of distinct positions in `[0, l)`. Requires `l >= 2`.
pub fn random_pair<R: Rng>(l: usize, rng: &mut R) -> Pair {
    let a = rng.gen_range(0..l);
    let mut b = rng.gen_range(0..l);
    while b == a {
        b = rng.gen_range(0..l);
    }
    (a as u16, b as u16)
}

/// Sample one parity-check set of `k` pairs.
pub fn random_parity_set<R: Rng>(l: usize, k: usize, rng: &mut R) -> Vec<Pair> {
    (0..k).map(|_| random_pair(l, rng)).collect()
}

/// Number of unordered pairs `a < b` over `l` positions.
pub fn pair_count(l: usize) -> usize {
    l * l.saturating_sub(1) / 2
}

/// Flatten an unordered pair into `[0, l(l-1)/2)`, row-major over `a < b`.
/// The pair may be given in either order.
pub fn pair_index(l: usize, a: usize, b: usize) -> usize {
    let (a, b) = if a < b { (a, b) } else { (b, a) };
    debug_assert!(b < l && a != b);
    // offset of row a = sum_{i<a} (l - 1 - i)
    a * l - a * (a + 1) / 2 + (b - a - 1)
}

/// XOR of every unordered pair of codeword bits, indexed by [`pair_index`].
pub fn xor_table(bits: &[u8]) -> Vec<u8> {
    let l = bits.len();
    let mut table = Vec::with_capacity(pair_count(l));
    for a in 0..l {
        for b in a + 1..l {
            table.push(bits[a] ^ bits[b]);
        }
    }
    table
}

/// Number of checks in `set` whose two bits differ.
pub fn count_ones(set: &[Pair], bits: &[u8]) -> usize {
    set.iter()
        .filter(|&&(a, b)| bits[a as usize] != bits[b as usize])
        .count()
}
