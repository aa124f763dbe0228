//! Case types accepted by the Delhi High Court case-number search.
//!
//! The dropdown on the site shows display names (`W.P.(C)`) but submits
//! short codes (`CW`). A few display names share one code; looking up such a
//! code gives the first entry listed here.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CaseType {
    pub display_name: &'static str,
    pub code: &'static str,
    pub description: &'static str,
}

const fn ct(display_name: &'static str, code: &'static str, description: &'static str) -> CaseType {
    CaseType { display_name, code, description }
}

pub static CASE_TYPES: &[CaseType] = &[
    ct("ARB.A.", "AAP", "Arbitration Appeal"),
    ct("ARB. A. (COMM.)", "ARBACOMM", "Arbitration Appeal (Commercial)"),
    ct("ARB.P.", "AA", "Arbitration Petition"),
    ct("BAIL APPLN.", "BA", "Bail Application"),
    ct("CA", "CAA", "Company Appeal"),
    ct("CA (COMM.IPD-CR)", "CACR", "Commercial Appeal (IPD - Copyright)"),
    ct("C.A.(COMM.IPD-GI)", "CAG", "Commercial Appeal (IPD - Geographical Indications)"),
    ct("C.A.(COMM.IPD-PAT)", "CAP", "Commercial Appeal (IPD - Patents)"),
    ct("C.A.(COMM.IPD-PV)", "CAPP", "Commercial Appeal (IPD - Plant Varieties)"),
    ct("C.A.(COMM.IPD-TM)", "CAT", "Commercial Appeal (IPD - Trade Marks)"),
    ct("CAVEAT(CO.)", "CAVC", "Caveat (Company)"),
    ct("CC(ARB.)", "CC", "Contempt Case (Arbitration)"),
    ct("CCP(CO.)", "CCPCO", "Contempt Case Petition (Company)"),
    ct("CCP(REF)", "CCPRF", "Contempt Case Petition (Reference)"),
    ct("CEAC", "CEAC", "Central Excise Act Case"),
    ct("CEAR", "CEAR", "Central Excise Act Reference"),
    ct("CHAT.A.C.", "CHATAC", "Chartered Accountants Act Case"),
    ct("CHAT.A.REF", "CHATRF", "Chartered Accountants Act Reference"),
    ct("CMI", "CMI", "Civil Miscellaneous Interlocutory"),
    ct("CM(M)", "CMM", "Civil Miscellaneous (Main)"),
    ct("CM(M)-IPD", "CMMI", "Civil Miscellaneous (Main) (IPD)"),
    ct("C.O.", "CO", "Cross Objection"),
    ct("CO.APP.", "COA", "Company Appeal (Division Bench)"),
    ct("CO.APPL.(C)", "CAC", "Company Application (Civil)"),
    ct("CO.APPL.(M)", "CAM", "Company Application (Miscellaneous)"),
    ct("CO.A(SB)", "COASB", "Company Appeal (Single Bench)"),
    ct("C.O.(COMM.IPD-CR)", "COC", "Commercial Original Petition (IPD - Copyright)"),
    ct("C.O.(COMM.IPD-GI)", "COG", "Commercial Original Petition (IPD - Geographical Indications)"),
    ct("C.O.(COMM.IPD-PAT)", "COP", "Commercial Original Petition (IPD - Patents)"),
    ct("C.O. (COMM.IPD-TM)", "COT", "Commercial Original Petition (IPD - Trade Marks)"),
    ct("CO.EX.", "COEX", "Company Execution"),
    ct("CONT.APP.(C)", "CCA", "Contempt Appeal (Civil)"),
    ct("CONT.CAS(C)", "CCP", "Contempt Case (Civil)"),
    ct("CONT.CAS.(CRL)", "CRLCC", "Contempt Case (Criminal)"),
    ct("CO.PET.", "CP", "Company Petition"),
    ct("C.REF.(O)", "CRULE", "Civil Reference (Original)"),
    ct("CRL.A.", "CRLA", "Criminal Appeal"),
    ct("CRL.L.P.", "CRLMP", "Criminal Leave Petition"),
    ct("CRL.M.C.", "CRLMM", "Criminal Miscellaneous Case"),
    ct("CRL.M.(CO.)", "CRLMC", "Criminal Miscellaneous (Company)"),
    ct("CRL.M.I.", "CRLMI", "Criminal Miscellaneous Interlocutory"),
    ct("CRL.O.", "CRLO", "Criminal Original"),
    ct("CRL.O.(CO.)", "CRLOC", "Criminal Original (Company)"),
    ct("CRL.REF.", "CRLRF", "Criminal Reference"),
    ct("CRL.REV.P.", "CRLR", "Criminal Revision Petition"),
    ct("CRL.REV.P.(MAT.)", "CRLRMAT", "Criminal Revision Petition (Matrimonial)"),
    ct("CRL.REV.P.(NDPS)", "CRLRNDPS", "Criminal Revision Petition (NDPS Act)"),
    ct("CRL.REV.P.(NI)", "CRLRNI", "Criminal Revision Petition (Negotiable Instruments Act)"),
    ct("C.R.P.", "CR", "Civil Revision Petition"),
    ct("CRP-IPD", "CRI", "Civil Revision Petition (IPD)"),
    ct("C.RULE", "CRULE", "Civil Rule"),
    ct("CS(COMM)", "SC", "Civil Suit (Commercial)"),
    ct("CS(OS)", "S", "Civil Suit (Original Side)"),
    ct("CS(OS) GP", "S", "Civil Suit (Original Side) GP"),
    ct("CUSAA", "CUSAA", "Customs Act Appeal"),
    ct("CUS.A.C.", "CUSAC", "Customs Act Case"),
    ct("CUS.A.R.", "CUSAR", "Customs Act Reference"),
    ct("CUSTOM A.", "CUSTOMA", "Customs Appeal"),
    ct("DEATH SENTENCE REF.", "DSRF", "Death Sentence Reference"),
    ct("EDC", "EDC", "Estate Duty Case"),
    ct("EDR", "EDR", "Estate Duty Reference"),
    ct("EFA(COMM)", "EFAC", "Execution First Appeal (Commercial)"),
    ct("EFA(OS)", "EFAOS", "Execution First Appeal (Original Side)"),
    ct("EFA(OS)  (COMM)", "EFAOSCOMM", "Execution First Appeal (Original Side) (Commercial)"),
    ct("EFA(OS)(IPD)", "EFI", "Execution First Appeal (Original Side) (IPD)"),
    ct("EL.PET.", "EP", "Election Petition"),
    ct("ETR", "ETR", "Expenditure Tax Reference"),
    ct("EX.F.A.", "EFA", "Execution First Appeal"),
    ct("EX.P.", "EX", "Execution Petition"),
    ct("EX.S.A.", "ESA", "Execution Second Appeal"),
    ct("FAO", "FAO", "First Appeal from Order"),
    ct("FAO (COMM)", "FAOC", "First Appeal from Order (Commercial)"),
    ct("FAO-IPD", "FAI", "First Appeal from Order (IPD)"),
    ct("FAO(OS)", "FAOOS", "First Appeal from Order (Original Side)"),
    ct("FAO(OS) (COMM)", "FAC", "First Appeal from Order (Original Side) (Commercial)"),
    ct("FAO(OS)(IPD)", "FAOI", "First Appeal from Order (Original Side) (IPD)"),
    ct("GCAC", "GCAC", "Gold Control Act Case"),
    ct("GCAR", "GCAR", "Gold Control Act Reference"),
    ct("GTA", "GTA", "Gift Tax Appeal"),
    ct("GTC", "GTC", "Gift Tax Case"),
    ct("GTR", "GTR", "Gift Tax Reference"),
    ct("I.A.", "IA", "Interlocutory Application"),
    ct("I.P.A.", "IPA", "Intellectual Property Appeal"),
    ct("ITA", "ITA", "Income Tax Appeal"),
    ct("ITC", "ITC", "Income Tax Case"),
    ct("ITR", "ITR", "Income Tax Reference"),
    ct("ITSA", "ITSA", "Income Tax Second Appeal"),
    ct("LA.APP.", "LAA", "Land Acquisition Appeal"),
    ct("LPA", "LPA", "Letters Patent Appeal"),
    ct("MAC.APP.", "MACA", "Motor Accident Claims Appeal"),
    ct("MAT.", "MAT", "Matrimonial Petition"),
    ct("MAT.APP.", "MATA", "Matrimonial Appeal"),
    ct("MAT.APP.(F.C.)", "MATFC", "Matrimonial Appeal (Family Court)"),
    ct("MAT.CASE", "MATC", "Matrimonial Case"),
    ct("MAT.REF.", "MATRF", "Matrimonial Reference"),
    ct("MISC. APPEAL(PMLA)", "PMLA", "Miscellaneous Appeal (Prevention of Money Laundering Act)"),
    ct("OA", "OA", "Original Application"),
    ct("OCJA", "OCJA", "Original Civil Jurisdiction Appeal"),
    ct("O.M.P.", "OMP", "Original Miscellaneous Petition"),
    ct("O.M.P. (COMM)", "OMPCOMM", "Original Miscellaneous Petition (Commercial)"),
    ct("OMP (CONT.)", "OMP(CONT.)", "Original Miscellaneous Petition (Contempt)"),
    ct("O.M.P. (E)", "OE", "Original Miscellaneous Petition (Enforcement)"),
    ct("O.M.P. (E) (COMM.)", "OMPECOMM", "Original Miscellaneous Petition (Enforcement) (Commercial)"),
    ct("O.M.P.(EFA)(COMM.)", "OMPEFACOMM", "Original Miscellaneous Petition (Execution First Appeal) (Commercial)"),
    ct("OMP (ENF.) (COMM.)", "OMPENFCOMM", "Original Miscellaneous Petition (Enforcement of Award) (Commercial)"),
    ct("O.M.P.(I)", "OI", "Original Miscellaneous Petition (Interim)"),
    ct("O.M.P.(I) (COMM.)", "OMPICOMM", "Original Miscellaneous Petition (Interim) (Commercial)"),
    ct("O.M.P. (J) (COMM.)", "OMPICOMM", "Original Miscellaneous Petition (J) (Commercial)"),
    ct("O.M.P. (MISC.)", "OMPMISC", "Original Miscellaneous Petition (Miscellaneous)"),
    ct("O.M.P.(MISC.)(COMM.)", "OMPMISCCOMM", "Original Miscellaneous Petition (Miscellaneous) (Commercial)"),
    ct("O.M.P.(T)", "OMPT", "Original Miscellaneous Petition (Termination)"),
    ct("O.M.P. (T) (COMM.)", "OMPTCOMM", "Original Miscellaneous Petition (Termination) (Commercial)"),
    ct("O.REF.", "OREF", "Original Reference"),
    ct("RC.REV.", "RCR", "Rent Control Revision"),
    ct("RC.S.A.", "RCSA", "Rent Control Second Appeal"),
    ct("RERA APPEAL", "RERA", "Real Estate Regulatory Authority Appeal"),
    ct("REVIEW PET.", "REVIEWPET", "Review Petition"),
    ct("RFA", "RFA", "Regular First Appeal"),
    ct("RFA(COMM)", "RFAC", "Regular First Appeal (Commercial)"),
    ct("RFA-IPD", "RFI", "Regular First Appeal (IPD)"),
    ct("RFA(OS)", "RFAOS", "Regular First Appeal (Original Side)"),
    ct("RFA(OS)(COMM)", "RFC", "Regular First Appeal (Original Side) (Commercial)"),
    ct("RF(OS)(IPD)", "RFO", "Regular First Appeal (Original Side) (IPD)"),
    ct("RSA", "RSA", "Regular Second Appeal"),
    ct("SCA", "SCA", "Supreme Court Appeal"),
    ct("SDR", "SDR", "Special Duty Reference"),
    ct("SERTA", "SERTA", "Service Tax Appeal"),
    ct("ST.APPL.", "STA", "Sales Tax Appeal"),
    ct("STC", "STC", "Sales Tax Case"),
    ct("ST.REF.", "STR", "Sales Tax Reference"),
    ct("SUR.T.REF.", "SRTRF", "Sur Tax Reference"),
    ct("TEST.CAS.", "PR", "Testamentary Case"),
    ct("TR.P.(C)", "TRPC", "Transfer Petition (Civil)"),
    ct("TR.P.(C.)", "TPC", "Transfer Petition (Civil) (Original Side)"),
    ct("TR.P.(CRL.)", "TRP", "Transfer Petition (Criminal)"),
    ct("VAT APPEAL", "VATA", "Value Added Tax Appeal"),
    ct("W.P.(C)", "CW", "Writ Petition (Civil)"),
    ct("W.P.(C)-IPD", "WO", "Writ Petition (Civil) (IPD)"),
    ct("WP(C)(IPD)", "WC", "Writ Petition (Civil) (IPD) (Original Side)"),
    ct("W.P.(CRL)", "CRLW", "Writ Petition (Criminal)"),
    ct("WTA", "WTA", "Wealth Tax Appeal"),
    ct("WTC", "WTC", "Wealth Tax Case"),
    ct("WTR", "WTR", "Wealth Tax Reference"),
];

static BY_DISPLAY: LazyLock<HashMap<String, &'static CaseType>> = LazyLock::new(|| {
    CASE_TYPES
        .iter()
        .map(|ct| (normalize(ct.display_name), ct))
        .collect()
});

static BY_CODE: LazyLock<HashMap<&'static str, &'static CaseType>> = LazyLock::new(|| {
    let mut map = HashMap::with_capacity(CASE_TYPES.len());
    for ct in CASE_TYPES {
        map.entry(ct.code).or_insert(ct);
    }
    map
});

// Display names are matched ignoring case and runs of whitespace.
fn normalize(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase()
}

pub fn all() -> &'static [CaseType] {
    CASE_TYPES
}

pub fn by_display_name(name: &str) -> Option<&'static CaseType> {
    BY_DISPLAY.get(&normalize(name)).copied()
}

pub fn by_code(code: &str) -> Option<&'static CaseType> {
    BY_CODE.get(code.trim().to_uppercase().as_str()).copied()
}

pub fn code_for(display_name: &str) -> Option<&'static str> {
    by_display_name(display_name).map(|ct| ct.code)
}

pub fn full_name(code: &str) -> Option<&'static str> {
    by_code(code).map(|ct| ct.description)
}

/// Accepts either a display name or a website code. Display names win.
pub fn resolve(input: &str) -> Option<&'static CaseType> {
    by_display_name(input).or_else(|| by_code(input))
}

/// Entries whose display name, code or description contains `filter`.
pub fn search(filter: &str) -> Vec<&'static CaseType> {
    let needle = filter.trim().to_lowercase();
    CASE_TYPES
        .iter()
        .filter(|ct| {
            needle.is_empty()
                || ct.display_name.to_lowercase().contains(&needle)
                || ct.code.to_lowercase().contains(&needle)
                || ct.description.to_lowercase().contains(&needle)
        })
        .collect()
}
