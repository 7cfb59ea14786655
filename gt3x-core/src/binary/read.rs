use std::io::{self, Read};

/// Читает до заполнения `buf` или до EOF. Возвращает число прочитанных байт.
///
/// В отличие от `read_exact`, короткий хвост не считается ошибкой: вызывающий
/// сам решает, что делать с неполным заголовком.
pub fn read_full<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
) -> io::Result<usize> {
    let mut filled = 0;

    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(filled)
}

/// Читает ровно `len` байт в новый вектор (или меньше на EOF).
pub fn read_vec<R: Read>(
    reader: &mut R,
    len: usize,
) -> io::Result<Vec<u8>> {
    let mut data = Vec::with_capacity(len);
    reader.by_ref().take(len as u64).read_to_end(&mut data)?;
    Ok(data)
}
