const ANY_SEQUENCE: char = '*';
const ANY_CHAR: char = '?';

/// Case-insensitive wildcard match over the whole of `text`.
///
/// `*` matches any run of characters (including none) and `?` matches
/// exactly one. Runs in O(n*m) time with constant extra state, since only
/// the most recent `*` ever needs to be revisited.
pub fn glob_match(text: &str, pattern: &str) -> bool {
    let text = text.to_lowercase().chars().collect::<Vec<char>>();
    let pattern = pattern.to_lowercase().chars().collect::<Vec<char>>();

    let (mut t, mut p) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;  // (pattern idx after '*', text idx)

    while t < text.len() {
        match pattern.get(p) {
            Some(&ANY_SEQUENCE) => {
                p += 1;
                backtrack = Some((p, t));
            }
            Some(&ch) if ch == ANY_CHAR || ch == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match backtrack {
                // let the last '*' absorb one more character
                Some((star_p, star_t)) => {
                    p = star_p;
                    t = star_t + 1;
                    backtrack = Some((star_p, t));
                }
                None => return false,
            }
        }
    }

    pattern[p..].iter().all(|&ch| ch == ANY_SEQUENCE)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_patterns() {
        assert!(glob_match("abc", "abc"));
        assert!(!glob_match("abc", "ab"));
        assert!(!glob_match("ab", "abc"));
        assert!(glob_match("", ""));
    }

    #[test]
    fn single_char_wildcard() {
        assert!(glob_match("abc", "a?c"));
        assert!(!glob_match("ac", "a?c"));
        assert!(!glob_match("abbc", "a?c"));
    }

    #[test]
    fn sequence_wildcard() {
        assert!(glob_match("abc", "a*c"));
        assert!(glob_match("ac", "a*c"));
        assert!(!glob_match("abd", "a*c"));
        assert!(glob_match("abcabc", "*bc"));
        assert!(glob_match("anything", "*"));
        assert!(glob_match("", "*"));
        assert!(glob_match("prefix.rest", "prefix*"));
        assert!(!glob_match("xprefix", "prefix*"));
    }

    #[test]
    fn backtracking() {
        assert!(glob_match("aaab", "*a*b"));
        assert!(glob_match("mississippi", "m*iss*ppi"));
        assert!(!glob_match("mississippi", "m*iss*ppx"));
        assert!(glob_match("abcbcd", "a*bcd"));
    }

    #[test]
    fn case_insensitive() {
        assert!(glob_match("ABC", "a*c"));
        assert!(glob_match("abc", "A?C"));
        assert!(glob_match("Hello World", "hello*WORLD"));
    }

    #[test]
    fn adversarial_pattern_terminates() {
        let text = "a".repeat(2000);
        let pattern = format!("{}b", "*a".repeat(50));
        assert!(!glob_match(&text, &pattern));
    }
}
