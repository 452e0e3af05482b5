use std::cmp::Ordering;
use std::fmt;

/// dpkg style version comparison.
///
/// Ordering is defined for arbitrary strings, so parsing never fails and
/// sorting a repository with sloppy version fields still terminates with a
/// consistent order.
#[derive(Clone, Debug)]
pub struct PkgVersion {
    raw: String,
    epoch: String,
    upstream: String,
    revision: String,
}

impl PkgVersion {
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl From<&str> for PkgVersion {
    fn from(s: &str) -> Self {
        // Epoch ends at the first colon and must be all digits, otherwise
        // the whole string belongs to the upstream version
        let (epoch, rest) = match s.split_once(':') {
            Some((e, r)) if !e.is_empty() && e.bytes().all(|b| b.is_ascii_digit()) => (e, r),
            _ => ("", s),
        };
        // Revision starts at the last hyphen
        let (upstream, revision) = match rest.rsplit_once('-') {
            Some((u, r)) => (u, r),
            None => (rest, ""),
        };

        PkgVersion {
            raw: s.to_string(),
            epoch: epoch.to_string(),
            upstream: upstream.to_string(),
            revision: revision.to_string(),
        }
    }
}

impl fmt::Display for PkgVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl Ord for PkgVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        // Epochs are digit runs, so verrevcmp doubles as a numeric compare
        verrevcmp(&self.epoch, &other.epoch)
            .then_with(|| verrevcmp(&self.upstream, &other.upstream))
            .then_with(|| verrevcmp(&self.revision, &other.revision))
    }
}

impl PartialOrd for PkgVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Equality must agree with cmp, "0:1.0" and "1.0" are the same version
impl PartialEq for PkgVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PkgVersion {}

/// Rank of a character inside a non-digit run: tilde sorts below end of
/// string, end of string below everything else, letters before non-letters.
fn char_order(c: u8) -> i16 {
    match c {
        b'~' => -1,
        b'0'..=b'9' => 0,
        b'A'..=b'Z' | b'a'..=b'z' => c as i16,
        _ => c as i16 + 256,
    }
}

/// Compare two version parts by walking maximal non-digit and digit runs,
/// the way dpkg's verrevcmp does.
fn verrevcmp(a: &str, b: &str) -> Ordering {
    let a = a.as_bytes();
    let b = b.as_bytes();
    let mut i = 0;
    let mut j = 0;

    while i < a.len() || j < b.len() {
        // Non-digit run; a missing character ranks like end of string
        while (i < a.len() && !a[i].is_ascii_digit()) || (j < b.len() && !b[j].is_ascii_digit()) {
            let x = if i < a.len() { char_order(a[i]) } else { 0 };
            let y = if j < b.len() { char_order(b[j]) } else { 0 };
            if x != y {
                return x.cmp(&y);
            }
            i += 1;
            j += 1;
        }

        // Digit run, compared as unsigned integers with leading zeros ignored
        while i < a.len() && a[i] == b'0' {
            i += 1;
        }
        while j < b.len() && b[j] == b'0' {
            j += 1;
        }
        let mut first_diff = Ordering::Equal;
        while i < a.len() && a[i].is_ascii_digit() && j < b.len() && b[j].is_ascii_digit() {
            if first_diff == Ordering::Equal {
                first_diff = a[i].cmp(&b[j]);
            }
            i += 1;
            j += 1;
        }
        // The longer remaining digit run is the bigger number
        if i < a.len() && a[i].is_ascii_digit() {
            return Ordering::Greater;
        }
        if j < b.len() && b[j].is_ascii_digit() {
            return Ordering::Less;
        }
        if first_diff != Ordering::Equal {
            return first_diff;
        }
    }

    Ordering::Equal
}
