use quickcheck::{Arbitrary, Gen};

/// A randomly generated pattern that always compiles.
///
/// Patterns are built from a tiny grammar over the alphabet `a`, `b` and
/// `c`, so that random haystacks over the same alphabet match reasonably
/// often. Every syntactic feature is represented: classes, wildcards,
/// anchors, all repetition operators, bounded repetitions, alternation and
/// groups.
#[derive(Clone, Debug)]
pub struct SmallPattern(pub String);

impl Arbitrary for SmallPattern {
    fn arbitrary(g: &mut Gen) -> SmallPattern {
        let mut pattern = String::new();
        alternation(g, 2, &mut pattern);
        SmallPattern(pattern)
    }
}

/// A randomly generated haystack over the same alphabet as `SmallPattern`,
/// plus a line terminator and a byte that is not valid UTF-8.
#[derive(Clone, Debug)]
pub struct SmallHaystack(pub Vec<u8>);

impl Arbitrary for SmallHaystack {
    fn arbitrary(g: &mut Gen) -> SmallHaystack {
        const ALPHABET: &[u8] = b"aaabbbcc\n\xFF";
        let len = usize::arbitrary(g) % 9;
        let bytes = (0..len)
            .map(|_| *g.choose(ALPHABET).expect("non-empty alphabet"))
            .collect();
        SmallHaystack(bytes)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = SmallHaystack>> {
        Box::new(self.0.shrink().map(SmallHaystack))
    }
}

fn alternation(g: &mut Gen, depth: u32, out: &mut String) {
    let branches = 1 + usize::arbitrary(g) % 2;
    for i in 0..branches {
        if i > 0 {
            out.push('|');
        }
        concatenation(g, depth, out);
    }
}

fn concatenation(g: &mut Gen, depth: u32, out: &mut String) {
    let pieces = 1 + usize::arbitrary(g) % 3;
    for _ in 0..pieces {
        atom(g, depth, out);
        let op = *g
            .choose(&["", "", "", "*", "+", "?", "{2}", "{1,2}", "{0,1}", "{1,}"])
            .expect("non-empty operators");
        out.push_str(op);
    }
}

fn atom(g: &mut Gen, depth: u32, out: &mut String) {
    let choice = u8::arbitrary(g) % 12;
    match choice {
        0..=4 => {
            let ch = *g.choose(&['a', 'b', 'c']).expect("non-empty alphabet");
            out.push(ch);
        }
        5 => out.push('.'),
        6 => out.push_str("[ab]"),
        7 => out.push_str("[^a]"),
        8 => out.push('^'),
        9 => out.push('$'),
        _ if depth == 0 => out.push('a'),
        _ => {
            out.push('(');
            alternation(g, depth - 1, out);
            out.push(')');
        }
    }
}
