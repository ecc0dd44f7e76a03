/// Package implementation for Word documents.
use crate::ooxml::docx::document::Body;
use crate::ooxml::docx::enums::HeaderFooterKind;
use crate::ooxml::docx::header_footer::HeaderFooter;
use crate::ooxml::docx::settings::Settings;
use crate::ooxml::docx::styles::StyleCatalog;
use crate::ooxml::docx::template;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::{content_type as ct, namespace, relationship_type as rt};
use crate::ooxml::opc::{OpcPackage, PackURI, Part, Relationship};
use crate::ooxml::xml::{ElementKind, XmlDocument, XmlElement, parse};
use std::io::{Read, Seek};
use std::path::Path;
use tracing::{debug, warn};

/// A parsed XML part and where it lives in the package.
#[derive(Debug, Clone)]
struct XmlPart {
    partname: PackURI,
    xml: XmlDocument,
}

/// A Word (.docx) package.
///
/// This is the main entry point for working with Word documents. It wraps
/// an OPC package and keeps the parts the transforms edit (the main
/// document, settings and every header or footer related from the main
/// document) parsed in memory. Everything else is carried through untouched.
///
/// # Examples
///
/// ```rust,no_run
/// use unlatch::ooxml::docx::Package;
///
/// let mut pkg = Package::open("document.docx")?;
/// if let Some(mut settings) = pkg.settings_mut() {
///     settings.remove_document_protection();
/// }
/// pkg.save("unlocked.docx")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Package {
    /// The underlying OPC package
    opc: OpcPackage,
    main_partname: PackURI,
    document: XmlDocument,
    settings: Option<XmlPart>,
    styles: StyleCatalog,
    headers_footers: Vec<XmlPart>,
}

impl Package {
    /// Open a .docx package from a file path.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use unlatch::ooxml::docx::Package;
    ///
    /// let pkg = Package::open("document.docx")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_opc(OpcPackage::open(path)?)
    }

    /// Create a .docx package from a reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        Self::from_opc(OpcPackage::from_reader(reader)?)
    }

    /// Create a .docx package from in-memory bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_opc(OpcPackage::from_bytes(data)?)
    }

    /// Wrap an already loaded OPC package.
    ///
    /// Fails with `InvalidPackage` when there is no main document part of
    /// the WordprocessingML type, and with `MissingBody` when the main
    /// document has no `<w:body>`.
    pub fn from_opc(opc: OpcPackage) -> Result<Self> {
        let main_partname = opc
            .main_document_partname()
            .map_err(|e| OoxmlError::InvalidPackage(format!("main document part: {}", e)))?;
        let main_part = opc.part(&main_partname).map_err(|_| {
            OoxmlError::InvalidPackage(format!("main document part {} is missing", main_partname))
        })?;

        let content_type = main_part.content_type();
        if content_type != ct::WML_DOCUMENT_MAIN {
            return Err(OoxmlError::InvalidPackage(format!(
                "main document part has content type {}",
                content_type
            )));
        }

        let document = parse(main_part.blob())?;
        if !document.root.is(ElementKind::Document) {
            return Err(OoxmlError::InvalidPackage(format!(
                "main document root is <{}>",
                document.root.name()
            )));
        }
        if !document.root.contains(ElementKind::Body) {
            return Err(OoxmlError::MissingBody(main_partname.to_string()));
        }

        let mut settings = None;
        let mut styles = StyleCatalog::default();
        let mut headers_footers: Vec<XmlPart> = Vec::new();

        for rel in main_part.rels().iter().filter(|rel| !rel.is_external()) {
            match rel.reltype() {
                rt::SETTINGS if settings.is_none() => settings = load_xml_part(&opc, rel)?,
                rt::STYLES if styles.is_empty() => {
                    if let Some(part) = load_xml_part(&opc, rel)? {
                        styles = StyleCatalog::from_element(&part.xml.root);
                    }
                },
                rt::HEADER | rt::FOOTER => {
                    if let Some(part) = load_xml_part(&opc, rel)?
                        && !headers_footers.iter().any(|p| p.partname == part.partname)
                    {
                        headers_footers.push(part);
                    }
                },
                _ => {},
            }
        }

        debug!(
            parts = opc.part_count(),
            headers_footers = headers_footers.len(),
            styles = styles.len(),
            has_settings = settings.is_some(),
            "loaded word package"
        );

        Ok(Self {
            opc,
            main_partname,
            document,
            settings,
            styles,
            headers_footers,
        })
    }

    /// A blank document: US Letter portrait, one-inch margins, one section
    /// whose default footer is an empty footer part.
    pub fn blank() -> Result<Self> {
        let document_uri = uri("/word/document.xml")?;
        let styles_uri = uri("/word/styles.xml")?;
        let settings_uri = uri("/word/settings.xml")?;
        let footer_uri = uri("/word/footer1.xml")?;

        let mut main = Part::new(
            document_uri.clone(),
            ct::WML_DOCUMENT_MAIN,
            template::default_document_xml().as_bytes().to_vec(),
        );
        main.relate_to(&styles_uri, rt::STYLES);
        main.relate_to(&settings_uri, rt::SETTINGS);
        let footer_r_id = main.relate_to(&footer_uri, rt::FOOTER);

        let mut opc = OpcPackage::new();
        opc.add_part(main)?;
        opc.add_part(Part::new(
            styles_uri,
            ct::WML_STYLES,
            template::default_styles_xml().as_bytes().to_vec(),
        ))?;
        opc.add_part(Part::new(
            settings_uri,
            ct::WML_SETTINGS,
            template::default_settings_xml().as_bytes().to_vec(),
        ))?;
        opc.add_part(Part::new(
            footer_uri,
            ct::WML_FOOTER,
            template::default_footer_xml().as_bytes().to_vec(),
        ))?;
        opc.relate_to(&document_uri, rt::OFFICE_DOCUMENT);

        let mut package = Self::from_opc(opc)?;
        let mut body = package.body_mut()?;
        for mut section in body.sections_mut() {
            section.set_sole_default_reference(HeaderFooterKind::Footer, &footer_r_id);
        }
        Ok(package)
    }

    /// The document body.
    pub fn body(&self) -> Result<Body<&XmlElement>> {
        self.document
            .root
            .find(ElementKind::Body)
            .map(Body::new)
            .ok_or_else(|| OoxmlError::MissingBody(self.main_partname.to_string()))
    }

    pub fn body_mut(&mut self) -> Result<Body<&mut XmlElement>> {
        self.document
            .root
            .find_mut(ElementKind::Body)
            .map(Body::new)
            .ok_or_else(|| OoxmlError::MissingBody(self.main_partname.to_string()))
    }

    /// The settings part, if the document has one.
    pub fn settings(&self) -> Option<Settings<&XmlElement>> {
        self.settings.as_ref().map(|part| Settings::new(&part.xml.root))
    }

    pub fn settings_mut(&mut self) -> Option<Settings<&mut XmlElement>> {
        self.settings
            .as_mut()
            .map(|part| Settings::new(&mut part.xml.root))
    }

    /// Styles defined in the styles part; empty when there is none.
    #[inline]
    pub fn style_catalog(&self) -> &StyleCatalog {
        &self.styles
    }

    /// The header or footer part a main-document relationship id points at.
    pub fn header_footer(&self, r_id: &str) -> Option<HeaderFooter<&XmlElement>> {
        let idx = self.header_footer_index(r_id)?;
        Some(HeaderFooter::new(&self.headers_footers[idx].xml.root))
    }

    pub fn header_footer_mut(&mut self, r_id: &str) -> Option<HeaderFooter<&mut XmlElement>> {
        let idx = self.header_footer_index(r_id)?;
        Some(HeaderFooter::new(&mut self.headers_footers[idx].xml.root))
    }

    /// Number of distinct header and footer parts.
    pub fn header_footer_count(&self) -> usize {
        self.headers_footers.len()
    }

    fn header_footer_index(&self, r_id: &str) -> Option<usize> {
        let partname = self
            .opc
            .part(&self.main_partname)
            .ok()?
            .related_partname(r_id)
            .ok()?;
        self.headers_footers
            .iter()
            .position(|part| part.partname == partname)
    }

    #[inline]
    pub fn main_partname(&self) -> &PackURI {
        &self.main_partname
    }

    /// Get the underlying OPC package.
    ///
    /// Edits made through the typed views reach the OPC parts only when the
    /// package is saved.
    #[inline]
    pub fn opc_package(&self) -> &OpcPackage {
        &self.opc
    }

    /// Write every parsed part back into its OPC part.
    fn flush(&mut self) -> Result<()> {
        let root = &mut self.document.root;
        root.ensure_namespace("w", namespace::WML_MAIN);
        root.ensure_namespace("r", namespace::OFC_RELATIONSHIPS);
        self.opc
            .part_mut(&self.main_partname)?
            .set_blob(self.document.to_bytes());

        if let Some(part) = self.settings.as_mut() {
            part.xml.root.ensure_namespace("w", namespace::WML_MAIN);
            self.opc
                .part_mut(&part.partname)?
                .set_blob(part.xml.to_bytes());
        }

        for part in &mut self.headers_footers {
            part.xml.root.ensure_namespace("w", namespace::WML_MAIN);
            part.xml
                .root
                .ensure_namespace("r", namespace::OFC_RELATIONSHIPS);
            self.opc
                .part_mut(&part.partname)?
                .set_blob(part.xml.to_bytes());
        }
        Ok(())
    }

    /// Serialize the package to .docx bytes.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.flush()?;
        Ok(self.opc.to_bytes()?)
    }

    /// Save the package to a file.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.flush()?;
        Ok(self.opc.save(path)?)
    }
}

fn uri(s: &str) -> Result<PackURI> {
    PackURI::new(s).map_err(OoxmlError::InvalidPackage)
}

/// Parse the part a relationship points at. A dangling relationship is
/// logged and skipped.
fn load_xml_part(opc: &OpcPackage, rel: &Relationship) -> Result<Option<XmlPart>> {
    let partname = rel.target_partname()?;
    let Ok(part) = opc.part(&partname) else {
        warn!(r_id = rel.r_id(), partname = %partname, "relationship target is missing");
        return Ok(None);
    };
    let xml = parse(part.blob())?;
    Ok(Some(XmlPart { partname, xml }))
}
