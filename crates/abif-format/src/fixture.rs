//! Synthetic ABIF files for tests.

use crate::entry::DirectoryEntry;

struct Field {
    name: [u8; 4],
    number: i32,
    element_type: i16,
    element_size: i16,
    num_elements: i32,
    payload: Vec<u8>,
}

/// Builds container bytes: header, external data regions, then directory.
pub(crate) struct ContainerBuilder {
    version: i16,
    fields: Vec<Field>,
}

impl ContainerBuilder {
    pub(crate) fn new(version: i16) -> Self {
        Self {
            version,
            fields: Vec::new(),
        }
    }

    pub(crate) fn field(
        mut self,
        name: &[u8; 4],
        number: i32,
        element_type: i16,
        element_size: i16,
        num_elements: i32,
        payload: Vec<u8>,
    ) -> Self {
        self.fields.push(Field {
            name: *name,
            number,
            element_type,
            element_size,
            num_elements,
            payload,
        });
        self
    }

    pub(crate) fn shorts(self, name: &[u8; 4], number: i32, values: &[i16]) -> Self {
        let payload = values.iter().flat_map(|v| v.to_be_bytes()).collect();
        self.field(name, number, 4, 2, values.len() as i32, payload)
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"ABIF");
        out.extend_from_slice(&self.version.to_be_bytes());
        let root_at = out.len();
        out.resize(root_at + DirectoryEntry::SIZE, 0);

        let mut slots = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            if field.payload.len() > 4 {
                slots.push((out.len() as i32).to_be_bytes());
                out.extend_from_slice(&field.payload);
            } else {
                let mut inline = [0u8; 4];
                inline[..field.payload.len()].copy_from_slice(&field.payload);
                slots.push(inline);
            }
        }

        let directory_at = out.len();
        for (field, slot) in self.fields.iter().zip(&slots) {
            write_record(
                &mut out,
                &field.name,
                field.number,
                field.element_type,
                field.element_size,
                field.num_elements,
                field.payload.len() as i32,
                *slot,
            );
        }

        let mut root = Vec::with_capacity(DirectoryEntry::SIZE);
        write_record(
            &mut root,
            b"tdir",
            1,
            1023,
            DirectoryEntry::SIZE as i16,
            self.fields.len() as i32,
            (self.fields.len() * DirectoryEntry::SIZE) as i32,
            (directory_at as i32).to_be_bytes(),
        );
        out[root_at..root_at + DirectoryEntry::SIZE].copy_from_slice(&root);
        out
    }
}

#[allow(clippy::too_many_arguments)]
fn write_record(
    out: &mut Vec<u8>,
    name: &[u8; 4],
    number: i32,
    element_type: i16,
    element_size: i16,
    num_elements: i32,
    data_size: i32,
    offset_field: [u8; 4],
) {
    out.extend_from_slice(name);
    out.extend_from_slice(&number.to_be_bytes());
    out.extend_from_slice(&element_type.to_be_bytes());
    out.extend_from_slice(&element_size.to_be_bytes());
    out.extend_from_slice(&num_elements.to_be_bytes());
    out.extend_from_slice(&data_size.to_be_bytes());
    out.extend_from_slice(&offset_field);
    out.extend_from_slice(&0i32.to_be_bytes());
}
