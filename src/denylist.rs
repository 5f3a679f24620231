//! Compiled-in denylist of resolver IP addresses to avoid when the
//! location-avoidant selection strategy is active.
//!
//! The table is a build-time constant; lookups go through a single hash
//! set built on first use, keyed by the parsed IP. Location and ASN data
//! are informational and only surface in logs.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::OnceLock;

/// One denylisted resolver endpoint.
#[derive(Debug)]
pub struct Entry {
    pub ip: &'static str,
    pub country: &'static str,
    pub location: &'static str,
    pub asn: &'static str,
    pub asn_name: &'static str,
}

const fn e(
    ip: &'static str,
    country: &'static str,
    location: &'static str,
    asn: &'static str,
    asn_name: &'static str,
) -> Entry {
    Entry {
        ip,
        country,
        location,
        asn,
        asn_name,
    }
}

fn index() -> &'static HashMap<IpAddr, &'static Entry> {
    static INDEX: OnceLock<HashMap<IpAddr, &'static Entry>> = OnceLock::new();
    INDEX.get_or_init(|| {
        ENTRIES
            .iter()
            .filter_map(|entry| entry.ip.parse().ok().map(|ip| (ip, entry)))
            .collect()
    })
}

/// Whether `ip` is denylisted. Exact match on the normalized address.
pub fn contains(ip: IpAddr) -> bool {
    index().contains_key(&ip)
}

/// Metadata for a denylisted IP, if any.
pub fn lookup(ip: IpAddr) -> Option<&'static Entry> {
    index().get(&ip).copied()
}

pub static ENTRIES: &[Entry] = &[
    e("180.94.94.194", "af", "Kabul, Kabul", "AS55330", "AFGHANTELECOM GOVERNMENT COMMUNICATION NETWORK"),
    e("117.104.227.243", "af", "Mazar-e Sharif, Balkh", "AS55424", "Instatelecom Limited"),
    e("194.110.177.46", "ax", "Mariehamn, Mariehamn", "AS3238", "Alands Telekommunikation Ab"),
    e("217.24.255.134", "al", "Tirana, Tirane", "AS42313", "Albtelecom Sh.a."),
    e("213.163.127.229", "al", "Tirana, Tirane", "AS8661", "Telekomi i Kosoves SH.A."),
    e("193.194.70.66", "dz", "Algiers, Alger", "AS3208", "Algerian Academic Research Network"),
    e("105.235.131.105", "dz", "Algiers, Alger", "AS33779", "Wataniya Telecom Algerie"),
    e("105.235.131.80", "dz", "Algiers, Alger", "AS33779", "Wataniya Telecom Algerie"),
    e("85.94.178.198", "ad", "Les Escaldes, Escaldes-Engordany", "AS6752", "ANDORRA TELECOM SAU"),
    e("194.158.78.137", "ad", "Andorra la Vella, Andorra la Vella", "AS6752", "ANDORRA TELECOM SAU"),
    e("69.57.230.68", "ai", "Castries, Castries", "AS15344", "Karib Cable"),
    e("185.121.177.177", "aq", "Auckland, Auckland", "AS204136", "Kevin Holly trading as Silent Ghost e.U."),
    e("186.148.128.86", "ar", "Bahia Blanca, Buenos Aires", "AS52279", "ETERNET S.R.L."),
    e("190.151.144.21", "ar", "Campana, Buenos Aires", "AS52339", "Lima Video Cable S.A. (Cabletel)"),
    e("200.45.48.233", "ar", "Buenos Aires, Ciudad Autonoma de Buenos Aires", "AS7303", "Telecom Argentina S.A."),
    e("181.14.245.186", "ar", "Buenos Aires, Ciudad Autonoma de Buenos Aires", "AS7303", "Telecom Argentina S.A."),
    e("200.45.184.43", "ar", "General Cabrera, Cordoba", "AS7303", "Telecom Argentina S.A."),
    e("200.110.130.195", "ar", "Buenos Aires, Ciudad Autonoma de Buenos Aires", "AS18747", "IFX Corporation"),
    e("179.60.232.10", "ar", "Rosario, Santa Fe", "AS263693", "WICORP SA"),
    e("170.210.83.110", "ar", "Buenos Aires, Ciudad Autonoma de Buenos Aires", "AS4270", "Red de Interconexion Universitaria"),
    e("200.55.54.234", "ar", "Buenos Aires, Ciudad Autonoma de Buenos Aires", "AS3549", "Level 3 Parent, LLC"),
    e("200.110.130.194", "ar", "Buenos Aires, Ciudad Autonoma de Buenos Aires", "AS18747", "IFX Corporation"),
    e("186.38.56.11", "ar", "Puerto Ibicuy, Entre Rios", "AS22927", "Telefonica de Argentina"),
    e("181.110.241.74", "ar", "Cordoba, Cordoba", "AS7303", "Telecom Argentina S.A."),
    e("157.92.190.15", "ar", "Buenos Aires, Ciudad Autonoma de Buenos Aires", "AS3449", "Universidad Nacional de Buenos Aires"),
    e("190.57.234.194", "ar", "Ciudad Autonoma de Buenos Aires", "AS20207", "Gigared S.A."),
    e("186.153.180.148", "ar", "Villaguay, Entre Rios", "AS7303", "Telecom Argentina S.A."),
    e("179.60.235.209", "ar", "Victoria, Entre Rios", "AS263693", "WICORP SA"),
    e("200.32.120.184", "ar", "Buenos Aires, Ciudad Autonoma de Buenos Aires", "AS3549", "Level 3 Parent, LLC"),
    e("200.59.236.202", "ar", "Anelo, Neuquen", "AS27751", "Neunet S.A."),
    e("200.16.147.18", "ar", "Buenos Aires, Ciudad Autonoma de Buenos Aires", "AS7049", "Silica Networks Argentina S.A."),
    e("31.47.196.211", "am", "Abovyan, Kotayk", "AS49800", "GNC-Alfa CJSC"),
    e("31.47.196.210", "am", "Abovyan, Kotayk", "AS49800", "GNC-Alfa CJSC"),
    e("81.16.8.110", "am", "Yerevan, Erevan", "AS44395", "Ucom CJSC"),
    e("185.8.3.151", "am", "Abovyan, Kotayk", "AS49800", "GNC-Alfa CJSC"),
    e("45.133.105.123", "am", "Yerevan, Erevan", "AS49800", "GNC-Alfa CJSC"),
    e("103.86.96.100", "au", "Sydney, New South Wales", "AS136787", "TEFINCOM S.A"),
    e("61.8.0.113", "au", "Sydney, New South Wales", "AS1221", "Telstra Corporation Ltd"),
    e("103.224.162.40", "au", "Coomba Park, New South Wales", "AS133324", "Ezi-Web"),
    e("192.232.128.21", "au", "Box Hill, Victoria", "AS23922", "BOX HILL INSTITUTE"),
    e("115.70.249.182", "au", "Perth, Western Australia", "AS10143", "Exetel Pty Ltd"),
    e("139.130.4.4", "au", "Adelaide, South Australia", "AS1221", "Telstra Corporation Ltd"),
    e("139.134.5.51", "au", "Sydney, New South Wales", "AS1221", "Telstra Corporation Ltd"),
    e("139.134.2.190", "au", "Sydney, New South Wales", "AS1221", "Telstra Corporation Ltd"),
    e("203.2.193.67", "au", "St Leonards, New South Wales", "AS703", "MCI Communications Services"),
    e("203.50.2.71", "au", "Melbourne, Victoria", "AS1221", "Telstra Corporation Ltd"),
    e("110.142.121.50", "au", "Ramsay, Queensland", "AS1221", "Telstra Corporation Ltd"),
    e("37.235.1.174", "at", "Vienna, Wien", "AS51453", "ANEXIA Internetdienstleistungs GmbH"),
    e("37.235.1.177", "at", "Vienna, Wien", "AS51453", "ANEXIA Internetdienstleistungs GmbH"),
    e("188.21.14.72", "at", "Vienna, Wien", "AS8447", "A1 Telekom Austria"),
    e("193.186.170.50", "at", "Hagenberg, Oberosterreich", "AS35369", "LINZ STROM GAS"),
    e("83.137.41.8", "at", "Innsbruck, Tirol", "AS31394", "nemox.net Informationstechnologie"),
    e("83.137.41.9", "at", "Innsbruck, Tirol", "AS31394", "nemox.net Informationstechnologie"),
    e("185.242.177.7", "at", "Leonding, Oberosterreich", "AS35369", "LINZ STROM GAS WAERME GmbH fuer Energiedienstleistungen und Telekommunikation"),
    e("194.36.144.87", "at", "Vienna, Wien", "AS197540", "netcup GmbH"),
    e("188.118.227.21", "at", "Vienna, Wien", "AS8437", "Hutchison Drei Austria"),
    e("83.218.176.140", "at", "Soelden, Tirol", "AS31543", "myNet GmbH"),
    e("85.132.85.85", "az", "Baku, Baki", "AS29049", "Delta Telecom Ltd"),
    e("85.132.32.41", "az", "Baku, Baki", "AS207251", "CASPEL LLC"),
    e("80.95.220.186", "bh", "Umm ash Sha'um, Al Janubiyah", "AS35457", "Etisalcom Bahrain Company W.L.L."),
    e("65.48.140.32", "bb", "Kingstown, Saint George", "AS46408", "Columbus Communication St. Vincent and the Grenadines Ltd."),
    e("65.48.140.38", "bb", "Kingstown, Saint George", "AS46408", "Columbus Communication St. Vincent and the Grenadines Ltd."),
    e("65.48.140.112", "bb", "Kingstown, Saint George", "AS46408", "Columbus Communication St. Vincent and the Grenadines Ltd."),
    e("65.48.140.125", "bb", "Kingstown, Saint George", "AS46408", "Columbus Communication St. Vincent and the Grenadines Ltd."),
    e("65.48.140.138", "bb", "Kingstown, Saint George", "AS46408", "Columbus Communication St. Vincent and the Grenadines Ltd."),
    e("65.48.140.150", "bb", "Kingstown, Saint George", "AS46408", "Columbus Communication St. Vincent and the Grenadines Ltd."),
    e("65.48.140.162", "bb", "Kingstown, Saint George", "AS46408", "Columbus Communication St. Vincent and the Grenadines Ltd."),
    e("65.48.140.192", "bb", "Kingstown, Saint George", "AS46408", "Columbus Communication St. Vincent and the Grenadines Ltd."),
    e("65.48.140.204", "bb", "Kingstown, Saint George", "AS46408", "Columbus Communication St. Vincent and the Grenadines Ltd."),
    e("65.48.140.250", "bb", "Kingstown, Saint George", "AS46408", "Columbus Communication St. Vincent and the Grenadines Ltd."),
    e("65.48.141.112", "bb", "Lovell Village, Grenadines", "AS46408", "Columbus Communication St. Vincent and the Grenadines Ltd."),
    e("65.48.234.43", "bb", "Kingstown, Saint George", "AS46408", "Columbus Communication St. Vincent and the Grenadines Ltd."),
    e("65.48.234.44", "bb", "Kingstown, Saint George", "AS46408", "Columbus Communication St. Vincent and the Grenadines Ltd."),
    e("65.48.234.81", "bb", "Kingstown, Saint George", "AS46408", "Columbus Communication St. Vincent and the Grenadines Ltd."),
    e("65.48.234.232", "bb", "Kingstown, Saint George", "AS46408", "Columbus Communication St. Vincent and the Grenadines Ltd."),
    e("213.184.224.254", "by", "Druzhba, Horad Minsk", "AS42772", "Unitary enterprise A1"),
    e("213.184.225.37", "by", "Minsk, Horad Minsk", "AS42772", "Unitary enterprise A1"),
    e("81.95.125.20", "be", "Brugge, West-Vlaanderen", "AS42160", "lcp nv"),
    e("91.183.238.145", "be", "Brussels, Brussels Hoofdstedelijk Gewest", "AS5432", "Proximus NV"),
    e("194.7.1.4", "be", "Machelen, Vlaams-Brabant", "AS702", "MCI Communications Services, Inc. d/b/a Verizon Business"),
    e("195.35.110.4", "be", "Brussels, Hoofdstedelijk Gewest", "AS15776", "International Business Machines of Belgium Ltd"),
    e("81.82.250.182", "be", "be Antwerpen, Antwerpen", "AS6848", "Telenet BVBA"),
    e("185.92.196.182", "be", "Waregem, West-Vlaanderen", "AS200884", "Effix Group"),
    e("194.78.185.81", "be", "be Mons, Hainaut", "AS5432", "Proximus NV"),
    e("81.82.196.44", "be", "Zaventem, Vlaams-Brabant", "AS6848", "Telenet BVBA"),
    e("81.82.197.98", "be", "Zaventem, Vlaams-Brabant", "AS6848", "Telenet BVBA"),
    e("81.82.199.111", "be", "Leuven, Vlaams-Brabant", "AS6848", "Telenet BVBA"),
    e("81.83.12.253", "be", "be Turnhout, Antwerpen", "AS6848", "Telenet BVBA"),
    e("81.83.18.23", "be", "Kortrijk, West-Vlaanderen", "AS6848", "Telenet BVBA"),
    e("81.83.18.81", "be", "Kortrijk, West-Vlaanderen", "AS6848", "Telenet BVBA"),
    e("81.83.19.129", "be", "Gent, Oost-Vlaanderen", "AS6848", "Telenet BVBA"),
    e("84.199.232.98", "be", "Mechelen, Antwerpen", "AS6848", "Telenet BVBA"),
    e("196.192.16.5", "bj", "Abomey-Calavi, Atlantique", "AS28683", "BENIN TELECOMS INFRASTRUCTURES SA"),
    e("103.29.225.241", "bt", "Thimphu, Thimphu", "AS23955", "TashiCell Domestic AS, Thimphu, Bhutan"),
    e("200.105.133.162", "bo", "La Paz, La Paz", "AS26210", "AXS Bolivia S. A."),
    e("200.87.195.70", "bo", "La Paz, La Paz", "AS6568", "Entel S.A."),
    e("167.157.20.2", "bo", "Cochabamba, Cochabamba", "AS6568", "Entel S.A."),
    e("188.124.210.1", "ba", "Banja Luka, Republika Srpska", "AS198252", "ELTA KABEL d.o.o."),
    e("92.36.225.9", "ba", "Gradacac, Federacija Bosne i Hercegovine", "AS9146", "BH Telecom d.d."),
    e("154.70.151.66", "bw", "Mogoditshane, Kweneng", "AS327716", "Microteck Enterprises (Pty) Ltd."),
    e("189.125.18.5", "br", "Cotia, Sao Paulo", "AS3549", "Level 3 Parent, LLC"),
    e("177.131.114.86", "br", "Chapeco, Santa Catarin", "AS262391", "ACESSOLINE TELECOMUNICACOES LTDA"),
    e("54.94.175.250", "br", "Sao Paulo, Sao Paulo", "AS16509", "Amazon.com, Inc."),
    e("177.43.35.247", "br", "Balneario Camboriu, Sa..", "AS18881", "TELEFÔNICA BRASIL S.A"),
    e("177.66.203.10", "br", "Mata de Sao Joao, Bahi", "AS53004", "Downup Telecomunicacoes e servico LTDA"),
    e("177.67.81.134", "br", "Franca, Sao Paul", "AS53013", "W I X NET DO BRASIL LTDA - ME"),
    e("177.92.0.90", "br", "Piraquara, Paran", "AS14868", "COPEL Telecomunicações S.A."),
    e("177.135.204.163", "br", "Lauro de Freitas, Bahi", "AS18881", "TELEFÔNICA BRASIL S.A"),
    e("177.159.232.50", "br", "Brasilia, Distrito Fed..", "AS18881", "TELEFÔNICA BRASIL S.A"),
    e("177.159.232.52", "br", "Brasilia, Distrito Fed..", "AS18881", "TELEFÔNICA BRASIL S.A"),
    e("177.159.232.53", "br", "Brasilia, Distrito Fed..", "AS18881", "TELEFÔNICA BRASIL S.A"),
    e("177.184.131.180", "br", "Sao Bernardo, Maranhao", "AS28368", "SOBRALNET SERVICOS E TELECOMUNICACOES LTDA"),
    e("186.194.224.82", "br", "Tupa, Sao Paul", "AS53143", "R&R PROVEDOR DE INTERNET LTDA"),
    e("186.225.194.29", "br", "Sao Paulo, Sao Paulo", "AS53174", "Pannet Serviços On Line Ltda"),
    e("187.32.81.223", "br", "Alvorada, Rio Grande d..", "AS16735", "ALGAR TELECOM S/A"),
    e("187.60.128.69", "br", "Lavras, Minas Gerais", "AS28152", "Navinet Ltda"),
    e("189.4.130.159", "br", "Santos, Sao Paul", "AS28573", "CLARO S.A."),
    e("189.42.239.34", "br", "Divinopolis, Minas Gerai", "AS4230", "CLARO S.A."),
    e("200.99.138.94", "br", "Sao Paulo, Sao Paulo", "AS10429", "TELEFÔNICA BRASIL S.A"),
    e("200.99.138.103", "br", "Sao Paulo, Sao Paulo", "AS10429", "TELEFÔNICA BRASIL S.A"),
    e("200.167.191.114", "br", "Sinop, Mato Grosso", "AS4230", "CLARO S.A."),
    e("200.169.8.1", "br", "Belo Horizonte, Minas ..", "AS21574", "Century Telecom Ltda"),
    e("200.174.105.3", "br", "Sao Paulo, Sao Paulo", "AS4230", "CLARO S.A."),
    e("200.179.97.194", "br", "Rio de Janeiro, Rio de..", "AS4230", "CLARO S.A."),
    e("200.252.235.20", "br", "Brasilia, Distrito Fed..", "AS4230", "CLARO S.A."),
    e("201.45.193.131", "br", "Horizonte, Ceara", "AS4230", "CLARO S.A."),
    e("186.216.63.97", "br", "Rio Bonito, Rio de Jan..", "AS262663", "METROFLEX TELECOMUNICACOES LTDA"),
    e("138.36.1.131", "br", "Fortaleza, Ceara", "AS264562", "TEX NET SERVIÇOS DE COMUNICAÇÃO EM INFORMATICA LTD"),
    e("177.104.127.114", "br", "Fortaleza, Ceara", "AS263655", "S&T PARTICIPACOES LTDA"),
    e("177.37.175.32", "br", "Joao Pessoa, Paraiba", "AS28126", "BRISANET SERVICOS DE TELECOMUNICACOES LTDA"),
    e("138.0.207.117", "br", "Penapolis, Sao Paulo", "AS264556", "L. Garcia Comunicações ME"),
    e("177.43.56.139", "br", "Diadema, Sao Paulo", "AS18881", "TELEFÔNICA BRASIL S.A"),
    e("177.47.128.2", "br", "Campos, Rio de Janeiro", "AS52993", "Ver Tv Comunicações S/A"),
    e("179.127.175.242", "br", "Lages, Santa Catarin", "AS28343", "Unifique Telecomunicações SA"),
    e("187.32.81.194", "br", "Alvorada, Rio Grande d..", "AS16735", "ALGAR TELECOM S/A"),
    e("189.125.73.13", "br", "Sao Paulo, Sao Paulo", "AS3549", "Level 3 Parent, LLC"),
    e("200.150.112.58", "br", "Apucarana, Paran", "AS14868", "COPEL Telecomunicações S.A."),
    e("200.221.11.100", "br", "Sao Paulo, Sao Paulo", "AS7162", "Universo Online S.A."),
    e("200.194.198.76", "br", "New York City, New Yor", "AS3549", "Level 3 Parent, LLC"),
    e("200.221.11.101", "br", "Sao Paulo, Sao Paulo", "AS7162", "Universo Online S.A."),
    e("189.90.241.10", "br", "Itabira, Minas Gerai", "AS28201", "Companhia Itabirana Telecomunicações Ltda"),
    e("201.44.177.131", "br", "Joinville, Santa Catarin", "AS4230", "CLARO S.A."),
    e("201.20.36.29", "br", "Sao Paulo, Sao Paulo", "AS16397", "EQUINIX BRASIL"),
    e("131.221.81.1", "br", "Sao Paulo, Sao Paulo", "AS4809", "China Telecom Next Generation Carrier Network Who"),
    e("179.108.248.9", "br", "Recife, Pernambuco", "AS263276", "BBG TELECOMLTDA"),
    e("131.196.220.10", "br", "Porto Alegre, Rio Gran..", "AS265985", "MELNET PROVEDOR"),
    e("138.219.105.100", "br", "Porto Alegre, Rio Gran..", "AS263925", "Acem Telecom Ltda"),
    e("138.97.84.2", "br", "Vila Velha, Espirito S..", "AS264138", "INTERLES COMUNICACOES LTDA"),
    e("138.97.84.3", "br", "Vila Velha, Espirito S..", "AS264138", "INTERLES COMUNICACOES LTDA"),
    e("164.163.1.90", "br", "Brasilia, Distrito Fed..", "AS265933", "connectx serviços de telecomunicações ltda"),
    e("168.196.78.18", "br", "Redencao, Ceara", "AS265455", "SKYNET TELECOM EIRELI"),
    e("170.239.136.10", "br", "Natal, Rio Grande do N..", "AS266352", "MUNDO NET"),
    e("170.239.144.20", "br", "Recife, Pernambuco", "AS266361", "JARBAS PASCHOAL BRAZIL JUNIOR INFORMATICA"),
    e("177.102.143.166", "br", "Sao Paulo, Sao Paulo", "AS27699", "TELEFÔNICA BRASIL S.A"),
    e("177.135.239.132", "br", "Sao Paulo, Sao Paulo", "AS10429", "TELEFÔNICA BRASIL S.A"),
    e("177.184.176.5", "br", "Itamarandiba, Minas Ge..", "AS52923", "Netcar Internet Telec Info e Tecnologia LTDA"),
    e("177.200.48.48", "br", "Rio de Janeiro, Rio de..", "AS52781", "Pertec Servicos de Telecomunicacoes ltda"),
    e("177.200.78.209", "br", "Cajuru, Sao Paul", "AS52783", "SKYNET TELECOMUNICACOES EIRELI"),
    e("177.55.32.240", "br", "Alto Parana, Paran", "AS262482", "HOMENET TELECOMUNICAÇÕES LTDA"),
    e("177.75.4.34", "br", "Brasilia, Distrito Fed..", "AS28178", "Networld Provedor e Servicos de Internet Ltda"),
    e("177.87.96.4", "br", "Natal, Rio Grande do N..", "AS262654", "Governo do Estado do Rio Grande do Norte"),
    e("179.181.132.219", "br", "Aracaju, Sergipe", "AS18881", "TELEFÔNICA BRASIL S.A"),
    e("179.191.88.90", "br", "Sao Paulo, Sao Paulo", "AS17222", "Mundivox LTDA"),
    e("179.228.67.140", "br", "Sao Paulo, Sao Paulo", "AS27699", "TELEFÔNICA BRASIL S.A"),
    e("186.225.45.138", "br", "Teresina, Piau", "AS28368", "SOBRALNET SERVICOS E TELECOMUNICACOES LTDA"),
    e("186.248.139.42", "br", "Belo Horizonte, Minas ..", "AS23106", "AMERICAN TOWER DO BRASIL-COMUNICAÇÂO MULTIMÍDIA LT"),
    e("186.251.103.10", "br", "Ipatinga, Minas Gerais", "AS262828", "Acesse Facil Telecomunicacoes Ltda"),
    e("186.251.103.3", "br", "Ipatinga, Minas Gerais", "AS262828", "Acesse Facil Telecomunicacoes Ltda"),
    e("186.251.226.253", "br", "Atibaia, Sao Paulo", "AS262838", "STARNET TELECOMUNICACOES LTDA"),
    e("187.45.113.26", "br", "Chapeco, Santa Catarin", "AS28146", "MHNET TELECOM"),
    e("187.49.127.110", "br", "Salvador, Bahi", "AS28144", "G3 TELECOM"),
    e("187.51.127.93", "br", "Sao Paulo, Sao Paulo", "AS10429", "TELEFÔNICA BRASIL S.A"),
    e("187.72.135.133", "br", "Sao Paulo, Sao Paulo", "AS16735", "ALGAR TELECOM S/A"),
    e("189.126.192.4", "br", "Sao Paulo, Sao Paulo", "AS28226", "Vogel Soluções em Telecom e Informática S/A"),
    e("189.23.31.242", "br", "Vila Velha, Espirito S..", "AS4230", "CLARO S.A."),
    e("189.51.144.23", "br", "Tupa, Sao Paul", "AS28349", "TVC TUPA EIRELI"),
    e("189.8.80.35", "br", "Sao Paulo, Sao Paulo", "AS28669", "America-NET Ltda."),
    e("189.89.61.244", "br", "Junqueiro, Alagoas", "AS262751", "LINK POINT SERVIÇOS LTDA-ME"),
    e("192.141.232.10", "br", "Padre Bernardo, Goia", "AS267495", "Brasil Central Telecomunicação"),
    e("200.143.177.83", "br", "Sao Paulo, Sao Paulo", "AS16397", "EQUINIX BRASIL"),
    e("200.150.83.115", "br", "Colombo, Paran", "AS14868", "COPEL Telecomunicações S.A."),
    e("200.169.96.11", "br", "Sao Paulo, Sao Paulo", "AS21911", "UOL DIVEO S.A."),
    e("200.178.191.82", "br", "Rio de Janeiro, Rio de..", "AS4230", "CLARO S.A."),
    e("200.202.233.21", "br", "Horizonte, Ceara", "AS7738", "Telemar Norte Leste S.A."),
    e("200.212.2.125", "br", "Sao Paulo, Sao Paulo", "AS4230", "CLARO S.A."),
    e("200.222.15.35", "br", "Petropolis, Rio de Jan..", "AS7738", "Telemar Norte Leste S.A."),
    e("200.252.235.19", "br", "Brasilia, Distrito Fed..", "AS4230", "CLARO S.A."),
    e("201.28.69.243", "br", "Sao Paulo, Sao Paulo", "AS10429", "TELEFÔNICA BRASIL S.A"),
    e("189.22.227.194", "br", "Rio de Janeiro, Rio de..", "AS4230", "CLARO S.A."),
    e("200.169.88.1", "br", "Sao Paulo, Sao Paulo", "AS21741", "Visualcorp Holding Ltda"),
    e("200.201.191.91", "br", "Mesquita, Rio de Janeiro", "AS17222", "Mundivox LTDA"),
    e("186.193.207.158", "br", "Sorocaba, Sao Paul", "AS262730", "Byteweb Comunicação Multimídia Ltda."),
    e("200.222.51.209", "br", "Rio de Janeiro, Rio de..", "AS7738", "Telemar Norte Leste S.A."),
    e("177.92.1.35", "br", "Lapa, Parana", "AS14868", "COPEL Telecomunicações S.A."),
    e("177.92.1.38", "br", "apa, Parana", "AS14868", "COPEL Telecomunicações S.A."),
    e("200.150.68.126", "br", "Curitiba, Parana", "AS14868", "COPEL Telecomunicações S.A."),
    e("200.150.84.26", "br", "Cambe, Paran", "AS14868", "COPEL Telecomunicações S.A."),
    e("200.195.132.210", "br", "Curitiba, Parana", "AS14868", "COPEL Telecomunicações S.A."),
    e("200.195.136.198", "br", "Curitiba, Parana", "AS14868", "COPEL Telecomunicações S.A."),
    e("200.195.154.122", "br", "Vitoria, Espirito Sant", "AS14868", "COPEL Telecomunicações S.A."),
    e("200.195.185.234", "br", "Curitiba, Parana", "AS14868", "COPEL Telecomunicações S.A."),
    e("189.125.17.210", "br", "Houston, Texas", "AS3549", "Level 3 Parent, LLC"),
    e("189.125.19.198", "br", "New York City, New Yor", "AS3549", "Level 3 Parent, LLC"),
    e("200.194.198.75", "br", "New York City, New Yor", "AS3549", "Level 3 Parent, LLC"),
    e("200.99.138.100", "br", "Sao Paulo, Sao Paulo", "AS10429", "TELEFÔNICA BRASIL S.A"),
    e("179.191.86.162", "br", "Sao Paulo, Sao Paulo", "AS17222", "Mundivox LTDA"),
    e("177.43.249.132", "br", "Sao Paulo, Sao Paulo", "AS18881", "TELEFÔNICA BRASIL S.A"),
    e("200.150.113.147", "br", "Curitiba, Parana", "AS14868", "COPEL Telecomunicações S.A."),
    e("177.69.96.187", "br", "Uberlandia, Minas Gerais", "AS16735", "ALGAR TELECOM S/A"),
    e("187.115.169.30", "br", "Salvador, Bahi", "AS18881", "TELEFÔNICA BRASIL S.A"),
    e("187.33.230.114", "br", "Joao Pessoa, Paraiba", "AS53087", "TELY Ltda."),
    e("189.124.138.68", "br", "Natal, Rio Grande do N..", "AS28220", "CABO SERVICOS DE TELECOMUNICACOES LTDA"),
    e("200.99.138.104", "br", "Sao Paulo, Sao Paulo", "AS10429", "TELEFÔNICA BRASIL S.A"),
    e("200.99.138.13", "br", "Sao Paulo, Sao Paulo", "AS10429", "TELEFÔNICA BRASIL S.A"),
    e("177.204.84.54", "br", "Sao Paulo, Sao Paulo", "AS18881", "TELEFÔNICA BRASIL S.A"),
    e("187.75.155.116", "br", "Sao Jose dos Campos, S..", "AS27699", "TELEFÔNICA BRASIL S.A"),
    e("177.19.217.206", "br", "Vila Velha, Espirito S..", "AS18881", "TELEFÔNICA BRASIL S.A"),
    e("177.130.60.40", "br", "Santarem, Para", "AS52747", "Wsp Serviços de Telecomunicações Ltda"),
    e("189.55.193.173", "br", "Sao Paulo, Sao Paulo", "AS28573", "CLARO S.A."),
    e("201.48.242.193", "br", "Uberlandia, Minas Gerais", "AS16735", "ALGAR TELECOM S/A"),
    e("179.185.88.86", "br", "Campo Grande, Mato Gro..", "AS18881", "TELEFÔNICA BRASIL S.A"),
    e("200.161.143.52", "br", "Piracicaba, Sao Paul", "AS27699", "TELEFÔNICA BRASIL S.A"),
    e("177.92.19.182", "br", "Curitiba, Parana", "AS14868", "COPEL Telecomunicações S.A."),
    e("168.196.78.22", "br", "Redencao, Ceara", "AS265455", "SKYNET TELECOM EIRELI"),
    e("168.228.148.43", "br", "Cavalcante, Goias", "AS264953", "INTEGRATO TELECOMUNICAÇÕES LTDA - ME"),
    e("177.124.247.2", "br", "Rio de Janeiro, Rio de..", "AS17222", "Mundivox LTDA"),
    e("177.155.135.81", "br", "Cacador, Santa Catarin", "AS53062", "GGNET TELECOMUNICAÇÕES LTDA"),
    e("177.69.240.252", "br", "Blumenau, Santa Catarina", "AS16735", "ALGAR TELECOM S/A"),
    e("177.93.250.3", "br", "Jacobina, Bahia", "AS52995", "TEN INTERNET Ltda"),
    e("186.215.192.243", "br", "Pompeia, Sao Paulo", "AS18881", "TELEFÔNICA BRASIL S.A"),
    e("191.253.65.194", "br", "Sao Luis, Maranhao", "AS263528", "VIACOM NEXT GENERATION COMUNICACAO LTDA"),
    e("200.220.192.88", "br", "Rio de Janeiro, Rio de..", "AS262589", "INTERNEXA BRASIL OPERADORA DE TELECOMUNICACOES S.A"),
    e("45.225.123.34", "br", "Paulo Afonso, Bahi", "AS266935", "CENTROSULNET INFORMATICA EIRELI"),
    e("45.225.123.88", "br", "Paulo Afonso, Bahi", "AS266935", "CENTROSULNET INFORMATICA EIRELI"),
    e("177.20.178.12", "br", "Piracicaba, Sao Paul", "AS263035", "PORTAL QUEOPS TELECOMUNICAÇÕES E SERVIÇOS"),
    e("202.44.113.14", "io", "Diego Garcia, British Indian Ocean Territory", "AS17458", "Sure (Diego Garcia) Limited"),
    e("202.152.77.212", "bn", "Bandar Seri Begawan, Brunei-Muara", "AS10101", "UNN-BN"),
    e("46.35.180.2", "bg", "Levski, Pleven", "AS58079", "Skynet Ltd"),
    e("85.118.192.3", "bg", "Sofia, Sofia (stolitsa)", "AS29244", "TELENOR BULGARIA EAD"),
    e("95.158.129.2", "bg", "Sofia, Sofia (stolitsa)", "AS41313", "NOVATEL EOOD"),
    e("212.73.140.66", "bg", "Sofia, Sofia (stolitsa)", "AS34224", "Neterra Ltd."),
    e("46.10.205.252", "bg", "Sofia, Sofia (stolitsa)", "AS8866", "Bulgarian Telecommunications Company Plc."),
    e("194.141.12.1", "bg", "Sofia, Sofia (stolitsa)", "AS6802", "Bulgarian Research and Education Network Association (BREN)"),
    e("212.91.171.146", "bg", "Sofia, Sofia (stolitsa)", "AS8717", "A1 Bulgaria EAD"),
    e("93.123.112.99", "bg", "Svoge, Sofia", "AS43561", "NET1 Ltd."),
    e("195.24.36.55", "bg", "Sofia, Sofia (stolitsa)", "AS8717", "A1 Bulgaria EAD"),
    e("84.54.131.65", "bg", "Burgas, Burgas", "AS29084", "Comnet Bulgaria Holding"),
    e("80.78.237.33", "bg", "Satovcha, Blagoevgrad", "AS39184", "UltraNET Ltd"),
    e("89.106.109.235", "bg", "Gabrovo, Gabrovo", "AS13306", "Unics EOOD"),
    e("80.78.237.4", "bg", "Satovcha, Blagoevgrad", "AS39184", "UltraNET Ltd"),
    e("195.234.239.130", "bg", "Sofia, Sofia (stolitsa)", "AS13236", "DATACOM LTD"),
    e("95.87.252.178", "bg", "Sofia, Sofia (stolitsa)", "AS43561", "NET1 Ltd."),
    e("195.110.24.248", "bg", "Sofia, Sofia (stolitsa)", "AS42191", "State Fund Agriculture"),
    e("91.215.219.133", "bg", "Plovdiv, Plovdiv", "AS49699", "Internet Corporated Networks Ltd."),
    e("196.28.245.26", "bf", "Ouagadougou, Kadiogo", "AS25543", "ONATEL (Office National des Telecommunications, PTT)"),
];
