use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS importacao (
    id INTEGER PRIMARY KEY,
    cliente TEXT NOT NULL,
    cpf TEXT NOT NULL,
    data TEXT NOT NULL,
    evento TEXT NOT NULL,
    hora_importacao TEXT NOT NULL,
    nascimento TEXT,
    tipo_ingresso TEXT NOT NULL,
    valor REAL NOT NULL CHECK (valor >= 0),
    taxa_adm REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS imports (
    id INTEGER PRIMARY KEY,
    filename TEXT NOT NULL,
    imported_at TEXT DEFAULT (datetime('now')),
    record_count INTEGER NOT NULL,
    checksum TEXT NOT NULL UNIQUE
);
";

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    #[test]
    fn test_init_db_creates_tables() {
        let (_dir, conn) = test_db();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();
        for expected in &["importacao", "imports"] {
            assert!(tables.contains(&expected.to_string()), "missing table: {expected}");
        }
    }

    #[test]
    fn test_init_db_is_idempotent() {
        let (_dir, conn) = test_db();
        init_db(&conn).unwrap();
    }

    #[test]
    fn test_importacao_rejects_negative_valor() {
        let (_dir, conn) = test_db();
        let result = conn.execute(
            "INSERT INTO importacao (cliente, cpf, data, evento, hora_importacao, nascimento, tipo_ingresso, valor, taxa_adm)
             VALUES ('Ana', '123', '2024-05-01', 'Show', '2024-05-01 10:00:00', '1990-01-01', 'VIP', -1.0, 0.0)",
            [],
        );
        assert!(result.is_err());
    }
}
