use serde::Serialize;

use super::*;

/// One entry of an `A2S_PLAYER` response.
///
/// `index` is the server's own slot number and is not guaranteed to be
/// contiguous across entries.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Player {
    pub index: u8,
    pub name: String,
    pub score: i32,
    /// Seconds connected.
    pub duration: f32,
}

/// Decodes an unframed player response body, keeping transmission order.
pub fn decode_players(body: &[u8]) -> Result<Vec<Player>> {
    let mut reader = Cursor::new(body);

    let _header = reader.read_byte()?;
    let count = reader.read_byte()?;

    let mut players = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let index = reader.read_byte()?;
        let name = reader.read_string()?;
        let score = reader.read_long()?;
        let duration = reader.read_float()?;

        players.push(Player {
            index,
            name,
            score,
            duration,
        });
    }

    reader.finish()?;

    Ok(players)
}

/// Encodes an unframed player response body. At most 255 players fit.
pub fn encode_players(players: &[Player]) -> Result<Vec<u8>> {
    let count = u8::try_from(players.len())
        .map_err(|_| QueryError::TooManyEntries(players.len()))?;

    let mut buf = vec![HEADER_PLAYERS];
    buf.put_byte(count);

    for player in players {
        buf.put_byte(player.index);
        buf.put_string(&player.name);
        buf.put_long(player.score);
        buf.put_float(player.duration);
    }

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_players_is_empty() {
        assert!(decode_players(&[HEADER_PLAYERS, 0x00]).unwrap().is_empty());
    }

    #[test]
    fn keeps_server_order_and_slot_numbers() {
        let players = vec![
            Player {
                index: 7,
                name: "Gordon".to_owned(),
                score: 12,
                duration: 613.25,
            },
            Player {
                index: 0,
                name: "".to_owned(),
                score: -3,
                duration: 0.5,
            },
        ];

        assert_eq!(decode_players(&encode_players(&players).unwrap()).unwrap(), players);
    }

    #[test]
    fn missing_player_entry_is_truncated() {
        let body = [HEADER_PLAYERS, 0x01];
        assert!(matches!(
            decode_players(&body),
            Err(QueryError::TruncatedBuffer { offset: 2, needed: 1, available: 0 })
        ));
    }

    #[test]
    fn count_must_fit_in_a_byte() {
        let player = Player {
            index: 0,
            name: "bot".to_owned(),
            score: 0,
            duration: 0.0,
        };

        assert_eq!(encode_players(&vec![player.clone(); 255]).unwrap()[1], 255);
        assert!(matches!(
            encode_players(&vec![player; 256]),
            Err(QueryError::TooManyEntries(256))
        ));
    }

    #[test]
    fn duration_cut_short_fails_at_its_offset() {
        let mut body = encode_players(&[Player {
            index: 1,
            name: "alyx".to_owned(),
            score: 4,
            duration: 10.0,
        }])
        .unwrap();
        let duration_offset = body.len() - 4;
        body.truncate(body.len() - 1);

        match decode_players(&body) {
            Err(QueryError::TruncatedBuffer { offset, needed: 4, available: 3 }) => {
                assert_eq!(offset, duration_offset);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
