use supset::ScanElement;

use crate::schema::Width;

// Element types that can be stored in a datafile, in native byte order.
pub trait Byteable: ScanElement {
    const WIDTH: Width;

    fn append_bytes(self, out: &mut Vec<u8>);
    // `bytes` holds exactly one element.
    fn from_bytes(bytes: &[u8]) -> Self;
}

macro_rules! byteable_int {
    ( $( $t:ty => $w:expr ),* ) => {
        $(
impl Byteable for $t {
    const WIDTH: Width = $w;

    fn append_bytes(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_ne_bytes());
    }

    fn from_bytes(bytes: &[u8]) -> Self {
        let mut buf = [0u8; std::mem::size_of::<$t>()];
        buf.copy_from_slice(bytes);
        <$t>::from_ne_bytes(buf)
    }
}
        )*
    }
}

byteable_int!{u16 => Width::U16, u32 => Width::U32}

pub fn vec_to_bytes<T: Byteable>(vec: &[T]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(vec.len() * T::WIDTH.bytes());
    for &item in vec {
        item.append_bytes(&mut bytes);
    }
    bytes
}
