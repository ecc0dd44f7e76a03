/// In-memory OPC package.
///
/// `OpcPackage` owns the package-level relationships and every part in the
/// order it was read, so that a loaded package can be edited and written
/// back without losing anything the docx layer does not understand.
use crate::ooxml::opc::constants::relationship_type;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{PACKAGE_URI, PackURI};
use crate::ooxml::opc::part::Part;
use crate::ooxml::opc::phys_pkg::PhysPkgReader;
use crate::ooxml::opc::pkgreader::PackageReader;
use crate::ooxml::opc::pkgwriter::PackageWriter;
use crate::ooxml::opc::rel::Relationships;
use std::collections::HashMap;
use std::io::{Read, Seek};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct OpcPackage {
    rels: Relationships,
    parts: Vec<Part>,
    /// Partname -> index into `parts`
    index: HashMap<PackURI, usize>,
}

impl OpcPackage {
    /// Create a new empty OPC package.
    pub fn new() -> Self {
        Self {
            rels: Relationships::new(PACKAGE_URI.to_string()),
            parts: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Open an OPC package from a file.
    ///
    /// # Example
    /// ```no_run
    /// use unlatch::ooxml::opc::OpcPackage;
    ///
    /// let pkg = OpcPackage::open("document.docx")?;
    /// println!("{} parts", pkg.part_count());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_phys_reader(PhysPkgReader::open(path)?)
    }

    /// Load an OPC package from a reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        Self::from_phys_reader(PhysPkgReader::new(reader)?)
    }

    /// Load an OPC package from in-memory ZIP bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_phys_reader(PhysPkgReader::from_bytes(data)?)
    }

    fn from_phys_reader(phys_reader: PhysPkgReader) -> Result<Self> {
        let mut pkg_reader = PackageReader::from_phys_reader(phys_reader)?;
        let mut package = Self::new();
        package.rels = pkg_reader.take_pkg_rels();

        for (spart, rels) in pkg_reader.take_parts() {
            let mut part = Part::new(spart.partname, spart.content_type, spart.blob);
            if let Some(rels) = rels {
                part.set_rels(rels);
            }
            package.add_part(part)?;
        }

        Ok(package)
    }

    /// Partname of the main document part (the officeDocument relationship target).
    pub fn main_document_partname(&self) -> Result<PackURI> {
        self.rels
            .part_with_reltype(relationship_type::OFFICE_DOCUMENT)?
            .target_partname()
    }

    /// The main document part.
    pub fn main_document_part(&self) -> Result<&Part> {
        let partname = self.main_document_partname()?;
        self.part(&partname)
    }

    pub fn part(&self, partname: &PackURI) -> Result<&Part> {
        self.index
            .get(partname)
            .map(|&i| &self.parts[i])
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    pub fn part_mut(&mut self, partname: &PackURI) -> Result<&mut Part> {
        match self.index.get(partname) {
            Some(&i) => Ok(&mut self.parts[i]),
            None => Err(OpcError::PartNotFound(partname.to_string())),
        }
    }

    /// Add a new part. Partnames are unique within a package.
    pub fn add_part(&mut self, part: Part) -> Result<()> {
        if self.index.contains_key(part.partname()) {
            return Err(OpcError::DuplicatePart(part.partname().to_string()));
        }
        self.index.insert(part.partname().clone(), self.parts.len());
        self.parts.push(part);
        Ok(())
    }

    /// Parts in package order.
    pub fn iter_parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.iter()
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    #[inline]
    pub fn contains_part(&self, partname: &PackURI) -> bool {
        self.index.contains_key(partname)
    }

    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    pub fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }

    /// Relate the package to a part, returning the relationship id.
    pub fn relate_to(&mut self, partname: &PackURI, reltype: &str) -> String {
        let target_ref = partname.relative_ref(PACKAGE_URI);
        self.rels.get_or_add(reltype, &target_ref).r_id().to_string()
    }

    /// First free partname for a template with a `%d` placeholder, e.g.
    /// `/word/footer%d.xml`.
    pub fn next_partname(&self, template: &str) -> Result<PackURI> {
        (1..=self.parts.len() + 1)
            .map(|n| template.replace("%d", &n.to_string()))
            .find_map(|candidate| {
                PackURI::new(candidate)
                    .ok()
                    .filter(|uri| !self.index.contains_key(uri))
            })
            .ok_or_else(|| OpcError::InvalidPackUri(template.to_string()))
    }

    /// Serialize to ZIP bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        PackageWriter::to_bytes(self)
    }

    /// Write to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        PackageWriter::write(path, self)
    }
}

impl Default for OpcPackage {
    fn default() -> Self {
        Self::new()
    }
}
