use torrentwatch_bencode::Value;

use crate::error::{Error, Result};

/// Checks that a decoded root value has the shape a torrent file must have.
/// Does not look at optional informational fields (`announce-list`,
/// `failure reason`, `warning message`) beyond the type they'd need if
/// present — those are read out permissively by the extractor.
pub fn check_message(root: &Value) -> Result<()> {
    let root = root.as_dict().ok_or(Error::WrongType("<root>"))?;
    let info = root.get(b"info".as_slice()).ok_or(Error::MissingField("info"))?;
    let info = info.as_dict().ok_or(Error::WrongType("info"))?;

    let piece_length = info
        .get(b"piece length".as_slice())
        .ok_or(Error::MissingField("piece length"))?
        .as_integer()
        .ok_or(Error::WrongType("piece length"))?;
    if piece_length <= 0 {
        return Err(Error::BadPieceLength);
    }

    let pieces = info
        .get(b"pieces".as_slice())
        .ok_or(Error::MissingField("pieces"))?
        .as_bytes()
        .ok_or(Error::WrongType("pieces"))?;
    if pieces.len() % 20 != 0 {
        return Err(Error::BadPiecesLength(pieces.len()));
    }

    info.get(b"name".as_slice())
        .ok_or(Error::MissingField("name"))?
        .as_bytes()
        .ok_or(Error::WrongType("name"))?;

    let length = info.get(b"length".as_slice());
    let files = info.get(b"files".as_slice());
    match (length, files) {
        (Some(_), Some(_)) | (None, None) => return Err(Error::AmbiguousLength),
        (Some(length), None) => {
            let n = length.as_integer().ok_or(Error::WrongType("length"))?;
            if n <= 0 {
                return Err(Error::WrongType("length"));
            }
        }
        (None, Some(files)) => {
            let files = files.as_list().ok_or(Error::WrongType("files"))?;
            if files.is_empty() {
                return Err(Error::MissingField("files"));
            }
            for file in files {
                let file = file.as_dict().ok_or(Error::WrongType("files[]"))?;
                let file_length = file
                    .get(b"length".as_slice())
                    .ok_or(Error::MissingField("files[].length"))?
                    .as_integer()
                    .ok_or(Error::WrongType("files[].length"))?;
                if file_length < 0 {
                    return Err(Error::WrongType("files[].length"));
                }
                let path = file
                    .get(b"path".as_slice())
                    .ok_or(Error::MissingField("files[].path"))?
                    .as_list()
                    .ok_or(Error::WrongType("files[].path"))?;
                if path.is_empty() {
                    return Err(Error::EmptyPath);
                }
                for component in path {
                    let component = component.as_bytes().ok_or(Error::WrongType("files[].path[]"))?;
                    if component.is_empty() {
                        return Err(Error::EmptyPath);
                    }
                }
            }
        }
    }

    Ok(())
}
