use serde::Serialize;

use super::*;

/// One server variable from an `A2S_RULES` response.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Rule {
    pub name: String,
    pub value: String,
}

/// Decodes an unframed rules response body. Every pair is kept, in order.
pub fn decode_rules(body: &[u8]) -> Result<Vec<Rule>> {
    let mut reader = Cursor::new(body);

    let _header = reader.read_byte()?;
    let count = reader.read_short()? as u16;

    let mut rules = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let name = reader.read_string()?;
        let value = reader.read_string()?;
        rules.push(Rule { name, value });
    }

    reader.finish()?;

    Ok(rules)
}

/// Encodes an unframed rules response body. At most 65535 rules fit.
pub fn encode_rules(rules: &[Rule]) -> Result<Vec<u8>> {
    let count = u16::try_from(rules.len())
        .map_err(|_| QueryError::TooManyEntries(rules.len()))?;

    let mut buf = vec![HEADER_RULES];
    buf.put_short(count as i16);

    for rule in rules {
        buf.put_string(&rule.name);
        buf.put_string(&rule.value);
    }

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str, value: &str) -> Rule {
        Rule {
            name: name.to_owned(),
            value: value.to_owned(),
        }
    }

    #[test]
    fn every_decoded_rule_is_returned() {
        let rules = vec![
            rule("mp_timelimit", "30"),
            rule("sv_cheats", "0"),
            rule("sv_tags", ""),
        ];

        let decoded = decode_rules(&encode_rules(&rules).unwrap()).unwrap();
        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded, rules);
    }

    #[test]
    fn no_rules() {
        assert!(decode_rules(&[HEADER_RULES, 0x00, 0x00]).unwrap().is_empty());
    }

    #[test]
    fn count_must_fit_in_a_short() {
        let rules = vec![rule("a", "b"); 65_536];
        assert!(matches!(encode_rules(&rules), Err(QueryError::TooManyEntries(65_536))));

        let body = encode_rules(&rules[..40_000]).unwrap();
        assert_eq!(decode_rules(&body).unwrap().len(), 40_000);
    }

    #[test]
    fn count_beyond_payload_is_truncated() {
        let mut body = encode_rules(&[rule("sv_gravity", "800")]).unwrap();
        body[1] = 2;

        assert!(matches!(
            decode_rules(&body),
            Err(QueryError::TruncatedBuffer { available: 0, .. })
        ));
    }

    #[test]
    fn missing_value_terminator_is_truncated() {
        let mut body = encode_rules(&[rule("sv_gravity", "800")]).unwrap();
        body.pop();

        let value_offset = 3 + "sv_gravity".len() + 1;
        match decode_rules(&body) {
            Err(QueryError::TruncatedBuffer { offset, .. }) => assert_eq!(offset, value_offset),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
